use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, sea_query::Expr,
};
use tracing::debug;

use crate::entities::movie;

pub type Movie = movie::Model;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("movie {0} does not exist")]
    NotFound(i32),

    #[error("a movie titled \"{0}\" is already in the list")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Metadata for a freshly added movie. Rating, ranking and review start empty.
#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i32>,
    pub description: String,
    pub img_url: String,
}

/// Partial update. `None` leaves the column as it is.
#[derive(Clone, Debug, Default)]
pub struct MovieChanges {
    pub rating: Option<f64>,
    pub review: Option<String>,
    pub ranking: Option<i32>,
}

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn list_all(&self) -> StoreResult<Vec<Movie>> {
        let movies = movie::Entity::find()
            .order_by_asc(movie::Column::Title)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    /// Highest rating first. Equal ratings keep insertion order.
    pub async fn list_by_rating_desc(&self) -> StoreResult<Vec<Movie>> {
        let movies = movie::Entity::find()
            .order_by_desc(movie::Column::Rating)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn count(&self) -> StoreResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> StoreResult<Movie> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(StoreError::NotFound(id))
    }

    pub async fn create(&self, new: NewMovie) -> StoreResult<Movie> {
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title.clone()),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(0.0),
            ranking: Set(0),
            review: Set(String::new()),
            img_url: Set(new.img_url),
        };

        match model.insert(&self.db).await {
            Ok(created) => {
                debug!(id = created.id, title = %created.title, "movie created");
                Ok(created)
            },
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(StoreError::Conflict(new.title))
            },
            Err(err) => Err(err.into()),
        }
    }

    pub async fn update(&self, id: i32, changes: MovieChanges) -> StoreResult<Movie> {
        let mut model = self.get(id).await?.into_active_model();

        if let Some(rating) = changes.rating {
            model.rating = Set(rating);
        }
        if let Some(review) = changes.review {
            model.review = Set(review);
        }
        if let Some(ranking) = changes.ranking {
            model.ranking = Set(ranking);
        }

        let updated = model.update(&self.db).await?;
        debug!(id, rating = updated.rating, ranking = updated.ranking, "movie updated");
        Ok(updated)
    }

    /// Writes only the ranking column.
    pub async fn set_ranking(&self, id: i32, ranking: i32) -> StoreResult<()> {
        let res = movie::Entity::update_many()
            .col_expr(movie::Column::Ranking, Expr::value(ranking))
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        debug!(id, "movie deleted");
        Ok(())
    }
}
