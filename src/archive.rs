//! Photo archive export.
//!
//! Bundles the photos referenced by a list of items into a zip archive,
//! one image per item, named sequentially after the item's position.

use std::io::{Seek, Write};

use log::{info, warn};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::backend::BackendClient;
use crate::error::Result;
use crate::models::Item;

/// Downloads each item's primary photo and writes it into the archive as
/// `image_{n}.{ext}`, where `n` is the item's 1-based position. A failed
/// fetch skips that item. Returns the number of images written.
pub async fn bundle_photos<W: Write + Seek>(
    client: &BackendClient,
    items: &[Item],
    writer: W,
) -> Result<usize> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default();
    let mut written = 0;

    for (index, item) in items.iter().enumerate() {
        let Some(key) = item.primary_photo_key() else {
            continue;
        };

        match client.download_photo(key).await {
            Ok(bytes) => {
                let name = format!("image_{}.{}", index + 1, extension_of(key));
                zip.start_file(name, options)?;
                zip.write_all(&bytes)?;
                written += 1;
            }
            Err(e) => {
                warn!("Skipping photo for '{}': {}", item.name, e);
            }
        }
    }

    zip.finish()?;
    info!("Archived {written} photo(s)");
    Ok(written)
}

fn extension_of(key: &str) -> &str {
    match key.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => "jpg",
    }
}
