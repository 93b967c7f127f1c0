use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

use crate::{
    entities::movie,
    error::{CatalogError, CatalogResult},
    models::{Movie, NewMovie},
};

/// CRUD over the `movies` table. No transactions; the last write wins.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> CatalogResult<Vec<Movie>> {
        let rows = movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> CatalogResult<Option<Movie>> {
        let row = movie::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Movie::from))
    }

    pub async fn insert(&self, new: &NewMovie) -> CatalogResult<Movie> {
        let title = required_title(new)?;
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(title),
            year: Set(new.year),
            director: Set(new.director.clone()),
            genre: Set(new.genre.clone()),
        };
        let row = model.insert(&self.db).await?;
        Ok(row.into())
    }

    /// Replaces every field of the row. `None` when no row has `id`.
    pub async fn update(&self, id: i32, new: &NewMovie) -> CatalogResult<Option<Movie>> {
        let title = required_title(new)?;
        let Some(row) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model = row.into_active_model();
        model.title = Set(title);
        model.year = Set(new.year);
        model.director = Set(new.director.clone());
        model.genre = Set(new.genre.clone());
        let row = model.update(&self.db).await?;
        Ok(Some(row.into()))
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> CatalogResult<bool> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

fn required_title(new: &NewMovie) -> CatalogResult<String> {
    new.title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CatalogError::Validation("title is required".to_string()))
}
