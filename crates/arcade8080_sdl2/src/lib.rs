use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use typed_builder::TypedBuilder;

use arcade8080_common::{App, Key};
pub use sdl2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    RGB24,
}

#[derive(TypedBuilder)]
pub struct SdlInitInfo {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub title: String,
    #[builder(default = PixelFormat::RGB24)]
    pub pixel_format: PixelFormat,
    /// Emulated frames per second; `update` is called at most this often.
    #[builder(default = 60)]
    pub frame_rate: u32,
}

impl SdlInitInfo {
    /// Window settings taken from the app itself.
    pub fn for_app(app: &impl App) -> Self {
        Self::builder()
            .width(app.width())
            .height(app.height())
            .scale(app.scale())
            .title(app.title())
            .build()
    }
}

pub struct SdlContext;

impl SdlContext {
    /// Open a window and drive `app` until it asks to exit or the window is
    /// closed.
    pub fn run(sdl_init_info: SdlInitInfo, mut app: impl App) -> Result<()> {
        let SdlInitInfo {
            width,
            height,
            scale,
            title,
            pixel_format,
            frame_rate,
        } = sdl_init_info;

        let sdl_context = sdl2::init().map_err(|e| anyhow!(e)).context("SDL init")?;
        let video_subsystem = sdl_context
            .video()
            .map_err(|e| anyhow!(e))
            .context("SDL video subsystem")?;
        let window = video_subsystem
            .window(&title, width * scale, height * scale)
            .position_centered()
            .build()?;
        let mut canvas = window.into_canvas().present_vsync().build()?;
        canvas
            .set_scale(scale as f32, scale as f32)
            .map_err(|e| anyhow!(e))?;
        let creator = canvas.texture_creator();
        let mut texture =
            creator.create_texture_streaming(map_pixel_format(pixel_format), width, height)?;
        let mut event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;

        let color_size = map_pixel_format_size(pixel_format);
        let mut screen_state = vec![0u8; (width * color_size * height) as usize];
        let frame_time = Duration::from_secs(1) / frame_rate.max(1);
        log::info!("{title}: {width}x{height} at {scale}x, {frame_rate} fps");

        app.init();
        loop {
            if app.should_exit() {
                app.exit();
                break;
            }
            let frame_start = Instant::now();

            for event in event_pump.poll_iter() {
                match event {
                    Event::Quit { .. } => {
                        app.exit();
                        return Ok(());
                    }
                    Event::KeyDown {
                        keycode: Some(keycode),
                        repeat: false,
                        ..
                    } => app.handle_key_event(map_keycode(keycode), true),
                    Event::KeyUp {
                        keycode: Some(keycode),
                        ..
                    } => app.handle_key_event(map_keycode(keycode), false),
                    _ => {}
                }
            }

            app.update(&mut screen_state);

            texture.update(None, &screen_state, (width * color_size) as usize)?;
            canvas.copy(&texture, None, None).map_err(|e| anyhow!(e))?;
            canvas.present();

            // Vsync may run faster than the emulated machine.
            if let Some(rest) = frame_time.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        Ok(())
    }
}

pub fn map_pixel_format(pixel_format: PixelFormat) -> PixelFormatEnum {
    match pixel_format {
        PixelFormat::RGB24 => PixelFormatEnum::RGB24,
    }
}

pub fn map_pixel_format_size(pixel_format: PixelFormat) -> u32 {
    match pixel_format {
        PixelFormat::RGB24 => 3,
    }
}

pub fn map_keycode(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Num1 => Key::Num1,
        Keycode::Num2 => Key::Num2,
        Keycode::A => Key::A,
        Keycode::C => Key::C,
        Keycode::D => Key::D,
        Keycode::P => Key::P,
        Keycode::S => Key::S,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Space => Key::Space,
        Keycode::Escape => Key::Escape,
        _ => Key::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cabinet_keys_are_mapped() {
        assert_eq!(map_keycode(Keycode::C), Key::C);
        assert_eq!(map_keycode(Keycode::Num1), Key::Num1);
        assert_eq!(map_keycode(Keycode::Left), Key::Left);
        assert_eq!(map_keycode(Keycode::Space), Key::Space);
        assert_eq!(map_keycode(Keycode::Escape), Key::Escape);
        assert_eq!(map_keycode(Keycode::F1), Key::None);
    }

    #[test]
    fn rgb24_is_three_bytes() {
        assert_eq!(map_pixel_format_size(PixelFormat::RGB24), 3);
    }
}
