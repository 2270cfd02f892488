use std::fmt;

use serde::Deserialize;

pub const MAX_RATING: f64 = 10.0;
pub const MAX_REVIEW_LEN: usize = 250;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub title: String,
}

impl SearchForm {
    pub fn validate(&self) -> Result<String, Vec<FieldError>> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(vec![FieldError::new("title", "enter a movie title to search for")]);
        }
        Ok(title.to_string())
    }
}

/// Raw rate/review form as posted.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RateForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RateMovie {
    pub rating: f64,
    pub review: String,
}

impl RateForm {
    pub fn validate(&self) -> Result<RateMovie, Vec<FieldError>> {
        let mut errors = Vec::new();

        let rating = match self.rating.trim().parse::<f64>() {
            Ok(r) if r.is_finite() && (0.0..=MAX_RATING).contains(&r) => Some(r),
            Ok(_) => {
                errors.push(FieldError::new("rating", "rating must be between 0 and 10"));
                None
            },
            Err(_) => {
                errors.push(FieldError::new("rating", "rating must be a number, e.g. 7.5"));
                None
            },
        };

        let review = self.review.trim().to_string();
        if review.chars().count() > MAX_REVIEW_LEN {
            errors.push(FieldError::new(
                "review",
                format!("review must be at most {MAX_REVIEW_LEN} characters"),
            ));
        }

        match rating {
            Some(rating) if errors.is_empty() => Ok(RateMovie { rating, review }),
            _ => Err(errors),
        }
    }
}
