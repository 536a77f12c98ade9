use crate::collection::ObjectRecord;
use crate::errors::{ExplorerError, ExplorerResult};
use crate::imurl::ImUrl;

use super::Artwork;

/// Map a raw object record into an `Artwork`
///
/// A blank `primaryImageSmall` yields `image_url: None`; deciding whether such
/// an artwork is shown is left to the caller.
///
/// # Errors
/// Returns `ExplorerError::MalformedResource` when a required field
/// (`objectID`, `title`, `objectEndDate`, `objectURL`) is missing or any
/// image URL fails to parse.
pub fn normalize(record: &ObjectRecord) -> ExplorerResult<Artwork> {
    let id = record
        .object_id
        .ok_or_else(|| ExplorerError::MalformedResource("record has no objectID".to_string()))?;

    let title = record
        .title
        .clone()
        .ok_or_else(|| missing(id, "title"))?;

    let year = record.object_end_date.ok_or_else(|| missing(id, "objectEndDate"))?;

    let link = record
        .object_url
        .clone()
        .filter(|link| !link.trim().is_empty())
        .ok_or_else(|| missing(id, "objectURL"))?;

    let image_url = match record.primary_image_small.as_deref().map(str::trim) {
        Some(src) if !src.is_empty() => Some(ImUrl::parse(src)?),
        _ => None,
    };

    let additional_image_urls = record
        .additional_images
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|src| ImUrl::parse(src))
        .collect::<ExplorerResult<Vec<_>>>()?;

    let artist = record
        .artist_display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("Unknown artist");

    Ok(Artwork {
        id,
        alt_text: format!("Artwork \"{title}\" by {artist}"),
        title,
        year,
        image_url,
        additional_image_urls,
        link,
    })
}

fn missing(id: crate::collection::ObjectId, field: &str) -> ExplorerError {
    ExplorerError::MalformedResource(format!("object {id} has no {field}"))
}
