use arcade8080_common::{App, Color, Key};

use crate::machine::{Button, SpaceInvadersMachine};
use crate::video::{decode_frame, Palette};
use crate::{SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};

/// Frontend-facing wrapper for the Space Invaders machine.
///
/// This type implements the shared `App` trait so that any frontend can
/// drive the emulator one frame per `update`.
pub struct SpaceInvadersApp {
    should_exit: bool,
    paused: bool,
    palette: Palette,
    pub machine: SpaceInvadersMachine,
}

impl SpaceInvadersApp {
    pub fn new(machine: SpaceInvadersMachine, palette: Palette) -> Self {
        Self {
            should_exit: false,
            paused: false,
            palette,
            machine,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Cabinet button driven by a logical key, if any.
///
/// - `C` → insert coin
/// - `Num1` / `Num2` → start 1 / 2 players
/// - `A`/`Left`, `D`/`Right` → move
/// - `S`/`Space` → fire
fn button_for(key: Key) -> Option<Button> {
    match key {
        Key::C => Some(Button::Coin),
        Key::Num1 => Some(Button::Start1),
        Key::Num2 => Some(Button::Start2),
        Key::A | Key::Left => Some(Button::Left),
        Key::D | Key::Right => Some(Button::Right),
        Key::S | Key::Space => Some(Button::Fire),
        _ => None,
    }
}

impl App for SpaceInvadersApp {
    fn init(&mut self) {
        log::info!("Space Invaders init");
    }

    fn update(&mut self, screen_state: &mut [u8]) {
        if !self.paused {
            self.machine.execute_frame();
        }

        decode_frame(self.machine.video_ram(), self.palette, screen_state);

        if self.paused {
            overlay_pause_banner(screen_state);
        }
    }

    fn handle_key_event(&mut self, key: Key, is_pressed: bool) {
        if is_pressed {
            match key {
                Key::Escape => {
                    self.should_exit = true;
                    return;
                }
                Key::P => {
                    self.paused = !self.paused;
                    log::debug!("Paused: {}", self.paused);
                    return;
                }
                // Any other key will unpause if the game is currently paused.
                _ if self.paused => {
                    self.paused = false;
                }
                _ => {}
            }
        }

        if let Some(button) = button_for(key) {
            self.machine.set_button(button, is_pressed);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!(
            "Space Invaders exit after {} frames",
            self.machine.frame_count()
        );
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        "Space Invaders 8080".to_string()
    }
}

/// Draw a striped band at the top of the screen while paused.
fn overlay_pause_banner(screen_state: &mut [u8]) {
    let banner_height = 12usize.min(SCREEN_HEIGHT);

    for y in 0..banner_height {
        let color = if y % 2 == 0 {
            Color::WHITE
        } else {
            Color::BLACK
        };
        for x in 0..SCREEN_WIDTH {
            color.write_rgb24(screen_state, y * SCREEN_WIDTH + x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::MachineConfig;
    use crate::rom::{RomSet, ROM_IMAGE_SIZE};

    fn app() -> SpaceInvadersApp {
        // 0000: JMP 0000
        let mut h = vec![0u8; ROM_IMAGE_SIZE];
        h[..3].copy_from_slice(&[0xc3, 0x00, 0x00]);
        let roms = RomSet::from_images([
            h,
            vec![0; ROM_IMAGE_SIZE],
            vec![0; ROM_IMAGE_SIZE],
            vec![0; ROM_IMAGE_SIZE],
        ])
        .unwrap();
        let machine = SpaceInvadersMachine::new(&roms, MachineConfig::default()).unwrap();
        SpaceInvadersApp::new(machine, Palette::Monochrome)
    }

    #[test]
    fn keys_drive_port1_buttons() {
        let mut app = app();
        app.handle_key_event(Key::C, true);
        app.handle_key_event(Key::Space, true);
        assert_eq!(app.machine.ports().port1().bits(), 0x08 | 0x01 | 0x10);
        app.handle_key_event(Key::C, false);
        assert_eq!(app.machine.ports().port1().bits(), 0x08 | 0x10);
    }

    #[test]
    fn pause_stops_frames() {
        let mut app = app();
        let mut screen = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * 3];
        app.update(&mut screen);
        assert_eq!(app.machine.frame_count(), 1);

        app.handle_key_event(Key::P, true);
        assert!(app.is_paused());
        app.update(&mut screen);
        assert_eq!(app.machine.frame_count(), 1);
        assert_eq!(&screen[..3], &[255, 255, 255]);

        app.handle_key_event(Key::Left, true);
        assert!(!app.is_paused());
    }

    #[test]
    fn escape_requests_exit() {
        let mut app = app();
        assert!(!app.should_exit());
        app.handle_key_event(Key::Escape, true);
        assert!(app.should_exit());
    }
}
