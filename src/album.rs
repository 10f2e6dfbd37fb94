use std::path::Path;
use raylib::prelude::*;
use tracing::{info, warn};
use crate::page::{placeholder_pages, Page, Size};
use crate::texture_loader::load_album_images;

/// An album with nothing to show gets the coloured placeholder pages instead.
pub fn pages_or_placeholders<T>(pages: Vec<Page<T>>) -> Vec<Page<T>> {
    if pages.is_empty() {
        placeholder_pages()
    } else {
        pages
    }
}

/// Decode an album directory and upload each image as a texture.
pub fn load_album_pages(rl: &mut RaylibHandle, thread: &RaylibThread, dir_path: &Path) -> Vec<Page<Texture2D>> {
    let mut pages = Vec::new();
    for (path, image) in load_album_images(dir_path) {
        match rl.load_texture_from_image(thread, &image) {
            Ok(texture) => {
                let natural_size = Size::new(texture.width() as f32, texture.height() as f32);
                pages.push(Page::image(texture, natural_size));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to create texture");
            }
        }
    }

    if pages.is_empty() {
        info!(dir = %dir_path.display(), "no usable images, showing placeholders");
    } else {
        info!(dir = %dir_path.display(), count = pages.len(), "album loaded");
    }
    pages_or_placeholders(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_album_falls_back_to_five_placeholders() {
        let pages = pages_or_placeholders::<()>(Vec::new());
        assert_eq!(pages.len(), 5);
        assert!(pages.iter().all(|page| matches!(page, Page::Placeholder(_))));
    }

    #[test]
    fn loaded_images_are_kept_as_is() {
        let pages = pages_or_placeholders(vec![Page::image(7, Size::new(10.0, 10.0))]);
        assert_eq!(pages.len(), 1);
        assert!(matches!(&pages[0], Page::Image(image) if image.texture == 7));
    }
}
