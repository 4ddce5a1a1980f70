//! The frame loop: a winit application handler driving the menu.
//!
//! One frame drains the queued input events into the controller, applies the
//! effects it requested, advances the background animation, and redraws.
//! Frames are capped at `TARGET_FPS` with `ControlFlow::WaitUntil`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use log::{error, info};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::audio::AudioContext;
use crate::config::Resolution;
use crate::input::{EventQueue, InputEvent};
use crate::menu::{Effect, MenuController};
use crate::renderer::Renderer;
use crate::window::apply_window_settings;

pub const TARGET_FPS: u32 = 60;
pub const WINDOW_TITLE: &str = "jmenu";

/// Longest step fed to the animation after a stall.
const MAX_FRAME_STEP: Duration = Duration::from_millis(250);

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Paces frames and measures the time between them.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self { frame: Duration::from_secs(1) / fps.max(1), last: None }
    }

    pub fn frame_duration(&self) -> Duration { self.frame }

    /// Mark the start of a frame at `now` and return the time since the
    /// previous one (one frame's worth for the first), capped at 250 ms.
    pub fn begin_frame(&mut self, now: Instant) -> Duration {
        let elapsed = match self.last {
            Some(prev) => now.saturating_duration_since(prev).min(MAX_FRAME_STEP),
            None => self.frame,
        };
        self.last = Some(now);
        elapsed
    }

    /// Earliest instant the next frame may start.
    pub fn next_deadline(&self, now: Instant) -> Instant {
        self.last.map_or(now, |last| last + self.frame)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_deadline(now)
    }
}

/// Map a physical window position into the logical layout space.
pub fn to_logical(pos: Vec2, physical: PhysicalSize<u32>, logical: Resolution) -> Vec2 {
    if physical.width == 0 || physical.height == 0 {
        return pos;
    }
    Vec2::new(
        pos.x * logical.width() as f32 / physical.width as f32,
        pos.y * logical.height() as f32 / physical.height as f32,
    )
}

/// Press or release at the last known pointer position.  Buttons pressed
/// before the pointer has ever been seen are dropped.
pub fn pointer_button_event(cursor: Option<Vec2>, state: ElementState, button: MouseButton) -> Option<InputEvent> {
    let pos = cursor?;
    Some(match state {
        ElementState::Pressed => InputEvent::PointerDown { pos, button },
        ElementState::Released => InputEvent::PointerUp { pos, button },
    })
}

// ── FrameLoop ─────────────────────────────────────────────────────────────────

pub struct FrameLoop {
    controller: MenuController,
    audio: AudioContext,
    renderer: Option<Renderer>,
    events: EventQueue,
    clock: FrameClock,
    /// Last pointer position in logical coordinates; `None` until the
    /// pointer first moves over the window.
    cursor: Option<Vec2>,
}

impl FrameLoop {
    pub fn new(controller: MenuController, audio: AudioContext) -> Self {
        Self {
            controller,
            audio,
            renderer: None,
            events: EventQueue::new(),
            clock: FrameClock::new(TARGET_FPS),
            cursor: None,
        }
    }

    fn logical_cursor(&self, position: PhysicalPosition<f64>) -> Vec2 {
        let pos = Vec2::new(position.x as f32, position.y as f32);
        match &self.renderer {
            Some(r) => to_logical(pos, r.window.inner_size(), r.logical()),
            None => pos,
        }
    }

    fn apply_effects(&mut self, event_loop: &ActiveEventLoop) {
        for effect in self.controller.take_effects() {
            match effect {
                Effect::RecreateSurface(config) => {
                    if let Some(renderer) = self.renderer.as_mut() {
                        apply_window_settings(&renderer.window, &config);
                        renderer.set_logical(config.resolution);
                        let size = renderer.window.inner_size();
                        renderer.resize(size);
                    }
                }
                Effect::VolumeChanged(volume) => self.audio.set_volume(volume),
                Effect::StartGame(slot) => info!("[app] Game start requested for slot {slot}"),
                Effect::Quit => event_loop.exit(),
            }
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let elapsed = self.clock.begin_frame(Instant::now());

        let events: Vec<InputEvent> = self.events.drain().collect();
        for event in &events {
            if self.controller.dispatch(event).is_some() {
                self.audio.play_click();
            }
            if self.controller.is_finished() {
                break;
            }
        }

        self.apply_effects(event_loop);
        if self.controller.is_finished() {
            event_loop.exit();
            return;
        }

        self.controller.tick(elapsed.as_millis() as u64);

        let list = self.controller.render();
        let Some(renderer) = self.renderer.as_mut() else { return };
        match renderer.render(&list, self.controller.assets_mut()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = renderer.window.inner_size();
                renderer.resize(size);
            }
            Err(e) => error!("[renderer] {e}"),
        }
    }
}

impl ApplicationHandler for FrameLoop {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        let config = self.controller.window_config();
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(config.width(), config.height()))
            .with_resizable(false);

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("[app] Cannot create window: {e}");
                event_loop.exit();
                return;
            }
        };
        if config.mode.is_fullscreen() {
            apply_window_settings(&window, &config);
        }

        match pollster::block_on(Renderer::new(window, config.resolution)) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                error!("[app] {e}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if self.clock.is_due(now) {
            if let Some(renderer) = self.renderer.as_ref() {
                renderer.window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline(now)));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.events.push(InputEvent::Quit),

            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let pos = self.logical_cursor(position);
                self.cursor = Some(pos);
                self.events.push(InputEvent::PointerMoved { pos });
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(event) = pointer_button_event(self.cursor, state, button) {
                    self.events.push(event);
                }
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key, state: ElementState::Pressed, text, .. },
                ..
            } => {
                let key = match physical_key {
                    PhysicalKey::Code(code) => Some(code),
                    PhysicalKey::Unidentified(_) => None,
                };
                // Printable characters only; control keys arrive through `key`.
                let text = text.as_ref().and_then(|t| t.chars().find(|c| !c.is_control()));
                self.events.push(InputEvent::KeyDown { key, text });
            }

            WindowEvent::RedrawRequested => self.frame(event_loop),

            _ => {}
        }
    }
}

/// Open the window and run the menu until it exits.
pub fn run(controller: MenuController, audio: AudioContext) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = FrameLoop::new(controller, audio);
    event_loop.run_app(&mut app)
}
