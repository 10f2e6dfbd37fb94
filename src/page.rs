use raylib::prelude::*;
use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A decoded image together with the size it is currently drawn at.
///
/// `T` is the texture handle. The kiosk uses raylib's `Texture2D`; the pager
/// itself never looks inside it.
#[derive(Debug)]
pub struct ImagePage<T> {
    pub texture: T,
    natural_size: Size,
    display_size: Size,
}

impl<T> ImagePage<T> {
    pub fn new(texture: T, natural_size: Size) -> Self {
        Self {
            texture,
            natural_size,
            display_size: natural_size,
        }
    }

    pub fn display_size(&self) -> Size {
        self.display_size
    }

    /// Scale to the largest size that fits inside `viewport`, keeping the aspect ratio.
    pub fn fit_to(&mut self, viewport: Size) {
        if viewport.is_empty() || self.natural_size.is_empty() {
            return;
        }
        let scale = (viewport.width / self.natural_size.width)
            .min(viewport.height / self.natural_size.height);
        self.display_size = Size::new(self.natural_size.width * scale, self.natural_size.height * scale);
    }
}

#[derive(Debug, Clone)]
pub struct Placeholder {
    pub color: Color,
    pub label: String,
}

#[derive(Debug)]
pub enum Page<T> {
    Image(ImagePage<T>),
    Placeholder(Placeholder),
}

impl<T> Page<T> {
    pub fn image(texture: T, natural_size: Size) -> Self {
        Page::Image(ImagePage::new(texture, natural_size))
    }

    pub fn placeholder(color: Color, label: impl Into<String>) -> Self {
        Page::Placeholder(Placeholder { color, label: label.into() })
    }

    /// Placeholders stretch to whatever rectangle they are drawn in, so only images rescale.
    pub fn fit_to(&mut self, viewport: Size) {
        match self {
            Page::Image(image) => image.fit_to(viewport),
            Page::Placeholder(_) => {}
        }
    }
}

/// The five coloured "Page N" pages shown for an album with nothing to display.
pub fn placeholder_pages<T>() -> Vec<Page<T>> {
    PLACEHOLDER_COLORS
        .iter()
        .enumerate()
        .map(|(i, &(r, g, b))| Page::placeholder(Color::new(r, g, b, 255), format!("Page {}", i + 1)))
        .collect()
}

impl Page<Texture2D> {
    /// Draw the page centred in `bounds`, shifted vertically by `offset_y`.
    pub fn draw<D: RaylibDraw>(&self, d: &mut D, bounds: Rectangle, offset_y: f32) {
        let top = bounds.y + offset_y;
        match self {
            Page::Image(image) => {
                let size = image.display_size();
                let tex_width = image.texture.width() as f32;
                let tex_height = image.texture.height() as f32;

                let dest = Rectangle::new(
                    bounds.x + (bounds.width - size.width) * 0.5,
                    top + (bounds.height - size.height) * 0.5,
                    size.width,
                    size.height,
                );

                d.draw_texture_pro(
                    &image.texture,
                    Rectangle::new(0.0, 0.0, tex_width, tex_height),
                    dest,
                    Vector2::new(0.0, 0.0),
                    0.0,
                    Color::WHITE,
                );
            }
            Page::Placeholder(placeholder) => {
                d.draw_rectangle_rec(
                    Rectangle::new(bounds.x, top, bounds.width, bounds.height),
                    placeholder.color,
                );

                let text_width = measure_text(&placeholder.label, PLACEHOLDER_FONT_SIZE);
                d.draw_text(
                    &placeholder.label,
                    (bounds.x + (bounds.width - text_width as f32) * 0.5) as i32,
                    (top + (bounds.height - PLACEHOLDER_FONT_SIZE as f32) * 0.5) as i32,
                    PLACEHOLDER_FONT_SIZE,
                    Color::WHITE,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect_ratio_for_wide_images() {
        let mut image = ImagePage::new((), Size::new(1600.0, 900.0));
        image.fit_to(Size::new(400.0, 1080.0));
        assert_eq!(image.display_size(), Size::new(400.0, 225.0));
    }

    #[test]
    fn fit_scales_small_images_up_to_the_viewport() {
        let mut image = ImagePage::new((), Size::new(100.0, 200.0));
        image.fit_to(Size::new(400.0, 600.0));
        assert_eq!(image.display_size(), Size::new(300.0, 600.0));
    }

    #[test]
    fn fit_ignores_empty_viewport() {
        let mut image = ImagePage::new((), Size::new(100.0, 200.0));
        image.fit_to(Size::new(0.0, 600.0));
        assert_eq!(image.display_size(), Size::new(100.0, 200.0));
    }

    #[test]
    fn placeholder_pages_are_numbered_from_one() {
        let pages = placeholder_pages::<()>();
        let labels: Vec<&str> = pages
            .iter()
            .map(|page| match page {
                Page::Placeholder(p) => p.label.as_str(),
                Page::Image(_) => panic!("expected placeholder"),
            })
            .collect();
        assert_eq!(labels, ["Page 1", "Page 2", "Page 3", "Page 4", "Page 5"]);
    }
}
