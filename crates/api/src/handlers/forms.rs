//! Multipart form parsing shared by the upload handlers.

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use folio_core::error::CoreError;
use folio_core::text::split_list;
use folio_core::types::DbId;
use folio_core::uploads::UploadFile;

use crate::error::{AppError, AppResult};

/// Fields of the project create/edit form.
///
/// Text fields are kept raw here; [`ProjectForm`] accessors parse them.
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub title: Option<String>,
    pub category_id: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub link_url: Option<String>,
    pub sort_order: Option<String>,
    /// New image files (`images` fields).
    pub images: Vec<UploadFile>,
    /// Public URLs of existing images to drop (`remove_images` fields).
    pub remove_images: Vec<String>,
}

impl ProjectForm {
    /// Drain a multipart body into a form. Unknown fields are ignored.
    pub async fn from_multipart(multipart: &mut Multipart) -> AppResult<Self> {
        let mut form = ProjectForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "images" => {
                    if let Some(file) = read_file(field).await? {
                        if !file.content_type.starts_with("image/") {
                            return Err(AppError::BadRequest(format!(
                                "'{}' is not an image ({})",
                                file.file_name, file.content_type
                            )));
                        }
                        form.images.push(file);
                    }
                }
                "remove_images" => {
                    form.remove_images.extend(split_list(&read_text(field).await?));
                }
                "title" => form.title = Some(read_text(field).await?),
                "category_id" => form.category_id = Some(read_text(field).await?),
                "description" => form.description = Some(read_text(field).await?),
                "tags" => form.tags = Some(read_text(field).await?),
                "link_url" => form.link_url = Some(read_text(field).await?),
                "sort_order" => form.sort_order = Some(read_text(field).await?),
                _ => {}
            }
        }

        Ok(form)
    }

    /// The selected category. Required.
    pub fn category_id(&self) -> AppResult<DbId> {
        let raw = self
            .category_id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CoreError::Validation("Category is required".into()))?;
        raw.parse().map_err(|_| {
            AppError::Core(CoreError::Validation(format!("Invalid category id '{raw}'")))
        })
    }

    /// Optional sort order; blank means unsorted.
    pub fn sort_order(&self) -> AppResult<Option<i32>> {
        match self.sort_order.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                AppError::Core(CoreError::Validation(format!("Invalid sort order '{raw}'")))
            }),
        }
    }

    pub fn title(&self) -> String {
        self.title.clone().unwrap_or_default()
    }

    pub fn tags(&self) -> Vec<String> {
        self.tags.as_deref().map(split_list).unwrap_or_default()
    }
}

/// Read a file field. Browsers submit an empty, nameless part for a file
/// input left blank; that yields `None`.
pub async fn read_file(field: Field<'_>) -> AppResult<Option<UploadFile>> {
    let file_name = field.file_name().unwrap_or("").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await?;

    if file_name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    if file_name.is_empty() {
        return Err(AppError::BadRequest("Uploaded file has no name".into()));
    }

    Ok(Some(UploadFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

async fn read_text(field: Field<'_>) -> AppResult<String> {
    Ok(field.text().await?)
}
