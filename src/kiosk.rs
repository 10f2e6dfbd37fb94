use anyhow::{ensure, Result};
use raylib::prelude::*;
use tracing::{debug, info};
use crate::album::load_album_pages;
use crate::config::AlbumConfig;
use crate::constants::*;
use crate::input::{column_bounds, ColumnGesture, PointerInput, PointerRouter};
use crate::page::Size;
use crate::pager::Pager;

#[derive(Debug, Clone, Copy)]
pub struct WindowOptions {
    pub fullscreen: bool,
}

struct Column {
    name: String,
    pager: Pager<Texture2D>,
}

/// The kiosk screen: one swipeable album per column.
///
/// Lifecycle is `open` → `configure` → `run`. Dropping the window releases
/// the textures, then closes the window.
pub struct KioskWindow {
    // Declared before the handle: textures must be unloaded while the window is still open
    columns: Vec<Column>,
    bounds: Vec<Rectangle>,
    pointer: PointerInput,
    router: PointerRouter,
    rl: RaylibHandle,
    thread: RaylibThread,
}

impl KioskWindow {
    pub fn open(options: &WindowOptions) -> Result<Self> {
        let mut builder = raylib::init();
        if options.fullscreen {
            // Zero size lets raylib pick the monitor resolution
            builder.size(0, 0).fullscreen();
        } else {
            builder.size(WINDOW_WIDTH, WINDOW_HEIGHT);
        }
        let (mut rl, thread) = builder.title("Album Kiosk").vsync().resizable().build();
        ensure!(rl.is_window_ready(), "failed to open the kiosk window");

        rl.set_target_fps(FPS);
        rl.set_trace_log(TraceLogLevel::LOG_ERROR);

        let bounds = column_bounds(rl.get_screen_width() as f32, rl.get_screen_height() as f32, COLUMN_COUNT);
        info!(width = rl.get_screen_width(), height = rl.get_screen_height(), "window opened");

        Ok(Self {
            columns: Vec::new(),
            bounds,
            pointer: PointerInput::new(),
            router: PointerRouter::new(),
            rl,
            thread,
        })
    }

    /// Load every album of `config` into its column, left to right.
    pub fn configure(&mut self, config: &AlbumConfig) {
        self.columns = config
            .albums()
            .zip(&self.bounds)
            .map(|((key, album), bounds)| {
                info!(column = key.key(), name = %album.name, path = %album.path.display(), "loading album");
                let pages = load_album_pages(&mut self.rl, &self.thread, &album.path);
                Column {
                    name: album.name.clone(),
                    pager: Pager::new(pages, Size::new(bounds.width, bounds.height)),
                }
            })
            .collect();
    }

    pub fn run(mut self) {
        while !self.rl.window_should_close() {
            let dt = self.rl.get_frame_time();

            if self.rl.is_window_resized() {
                self.relayout();
            }

            self.handle_input();

            for column in self.columns.iter_mut() {
                if column.pager.update(dt).is_some() {
                    debug!(album = %column.name, index = column.pager.current_index(), "page shown");
                }
            }

            self.draw();
        }
        info!("window closed");
    }

    fn handle_input(&mut self) {
        let Some(event) = self.pointer.poll(&self.rl) else {
            return;
        };
        let Some((index, gesture)) = self.router.route(event, &self.bounds) else {
            return;
        };
        let Some(column) = self.columns.get_mut(index) else {
            return;
        };

        match gesture {
            ColumnGesture::Start(position) => column.pager.on_gesture_start(position),
            ColumnGesture::End(position) => {
                if let Some(handle) = column.pager.on_gesture_end(position) {
                    debug!(column = index, ?handle, "swipe accepted");
                }
            }
        }
    }

    fn relayout(&mut self) {
        let width = self.rl.get_screen_width() as f32;
        let height = self.rl.get_screen_height() as f32;
        self.bounds = column_bounds(width, height, COLUMN_COUNT);

        for (column, bounds) in self.columns.iter_mut().zip(&self.bounds) {
            column.pager.on_resize(Size::new(bounds.width, bounds.height));
        }
        debug!(width, height, "window resized");
    }

    fn draw(&mut self) {
        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(Color::BLACK);

        for (column, bounds) in self.columns.iter().zip(&self.bounds) {
            {
                let mut clipped = d.begin_scissor_mode(
                    bounds.x as i32,
                    bounds.y as i32,
                    bounds.width as i32,
                    bounds.height as i32,
                );
                column.pager.draw(&mut clipped, *bounds);
            }

            // Album name along the bottom edge
            let caption_height = CAPTION_FONT_SIZE + 16;
            let caption_top = (bounds.y + bounds.height) as i32 - caption_height;
            d.draw_rectangle(
                bounds.x as i32,
                caption_top,
                bounds.width as i32,
                caption_height,
                Color::new(0, 0, 0, 120),
            );
            d.draw_text(
                &column.name,
                bounds.x as i32 + 12,
                caption_top + 8,
                CAPTION_FONT_SIZE,
                Color::new(255, 255, 255, 220),
            );
        }
    }
}
