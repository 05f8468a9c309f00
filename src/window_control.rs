//! Window control for X11-based systems.
//!
//! Commands target the window manager's frontmost window through standard
//! EWMH client messages: close, iconify, fullscreen, and repositioning a
//! held window while it is dragged. A logging implementation backs dry
//! runs and headless fallback.

use std::thread;
use std::time::Duration;

use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::xproto::{
        Atom, AtomEnum, ClientMessageEvent, ConnectionExt, EventMask, Screen, Window,
    },
    rust_connection::RustConnection,
};

use crate::{
    constants::{DRAG_TITLEBAR_INSET_PX, PICKUP_SETTLE_MS},
    error::{AppError, Result},
    landmarks::Landmark,
    utils::f64_to_i32_clamp,
};

/// EWMH source indication for direct user actions
const SOURCE_USER_ACTION: u32 = 2;

/// ICCCM `WM_CHANGE_STATE` iconic state
const ICONIC_STATE: u32 = 3;

/// `_NET_WM_STATE` add action
const NET_WM_STATE_ADD: u32 = 1;

/// `_NET_MOVERESIZE_WINDOW` flag layout: gravity in the low byte,
/// presence bits for x/y/width/height at 8..=11, source at 12..=15
const MOVERESIZE_GRAVITY_NORTHWEST: u32 = 1;
const MOVERESIZE_X_PRESENT: u32 = 1 << 8;
const MOVERESIZE_Y_PRESENT: u32 = 1 << 9;
const MOVERESIZE_SOURCE_USER: u32 = SOURCE_USER_ACTION << 12;

/// A window command dispatched to the collaborator, reported per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowCommand {
    /// Close the frontmost window
    Close,
    /// Minimize the frontmost window
    Minimize,
    /// Make the frontmost window full screen
    FullScreen,
    /// Grab the frontmost window for dragging
    PickUp,
    /// Move the held window toward a normalized screen position
    Drag(Landmark),
    /// Release the held window
    Drop,
}

/// Desktop collaborator executing window commands.
///
/// Every operation is fire-and-forget from the caller's perspective:
/// failures are reported for logging but never interpreted further.
pub trait WindowControl {
    /// Close the frontmost window
    fn close_frontmost_window(&mut self) -> Result<()>;

    /// Minimize the frontmost window
    fn minimize_frontmost_window(&mut self) -> Result<()>;

    /// Make the frontmost window full screen
    fn full_screen_frontmost_window(&mut self) -> Result<()>;

    /// Begin a drag by grabbing the frontmost window
    fn pickup_window(&mut self) -> Result<()>;

    /// Move the held window toward the normalized target position
    fn drag_window(&mut self, target: Landmark) -> Result<()>;

    /// Release the held window at its current position
    fn drop_window(&mut self) -> Result<()>;
}

/// Interned atoms for the EWMH messages in use
#[derive(Debug, Clone, Copy)]
struct Atoms {
    net_active_window: Atom,
    net_close_window: Atom,
    net_wm_state: Atom,
    net_wm_state_fullscreen: Atom,
    net_moveresize_window: Atom,
    wm_change_state: Atom,
}

/// The window currently held by a drag
#[derive(Debug, Clone, Copy)]
struct GrabbedWindow {
    window: Window,
    width: u16,
}

/// Window control implementation for X11
pub struct X11WindowControl {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
    atoms: Atoms,
    grabbed: Option<GrabbedWindow>,
}

impl X11WindowControl {
    /// Create a new window controller
    pub fn new() -> Result<Self> {
        info!("Initializing X11 window controller");

        // Connect to X11 server
        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| AppError::WindowControl(format!("Failed to connect to X11: {e}")))?;

        // Get screen information
        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| AppError::WindowControl("Failed to get screen".to_string()))?
            .clone();

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        let atoms = Atoms {
            net_active_window: intern(&connection, "_NET_ACTIVE_WINDOW")?,
            net_close_window: intern(&connection, "_NET_CLOSE_WINDOW")?,
            net_wm_state: intern(&connection, "_NET_WM_STATE")?,
            net_wm_state_fullscreen: intern(&connection, "_NET_WM_STATE_FULLSCREEN")?,
            net_moveresize_window: intern(&connection, "_NET_MOVERESIZE_WINDOW")?,
            wm_change_state: intern(&connection, "WM_CHANGE_STATE")?,
        };

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen_width, screen_height
        );

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
            atoms,
            grabbed: None,
        })
    }

    /// Get screen dimensions
    pub const fn get_screen_size(&self) -> (u16, u16) {
        (self.screen_width, self.screen_height)
    }

    /// Map normalized coordinates to screen coordinates
    pub fn map_to_screen(&self, normalized_x: f64, normalized_y: f64) -> (i32, i32) {
        (
            scale_to_pixels(normalized_x, self.screen_width),
            scale_to_pixels(normalized_y, self.screen_height),
        )
    }

    /// The window the window manager reports as active
    fn active_window(&self) -> Result<Window> {
        let reply = self
            .connection
            .get_property(
                false,
                self.screen.root,
                self.atoms.net_active_window,
                AtomEnum::WINDOW,
                0,
                1,
            )
            .map_err(|e| AppError::WindowControl(format!("Failed to send property request: {e}")))?
            .reply()
            .map_err(|e| AppError::WindowControl(format!("Failed to read active window: {e}")))?;

        reply
            .value32()
            .and_then(|mut values| values.next())
            .filter(|window| *window != x11rb::NONE)
            .ok_or_else(|| AppError::WindowControl("No active window".to_string()))
    }

    /// Send a format-32 client message to the root window
    fn send_client_message(
        &self,
        window: Window,
        message_type: Atom,
        data: [u32; 5],
    ) -> Result<()> {
        let event = ClientMessageEvent::new(32, window, message_type, data);

        self.connection
            .send_event(
                false,
                self.screen.root,
                EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
                event,
            )
            .map_err(|e| AppError::WindowControl(format!("Failed to send client message: {e}")))?;

        self.connection
            .flush()
            .map_err(|e| AppError::WindowControl(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }
}

impl WindowControl for X11WindowControl {
    fn close_frontmost_window(&mut self) -> Result<()> {
        let window = self.active_window()?;
        info!("Closing window {window:#010x}");
        self.send_client_message(
            window,
            self.atoms.net_close_window,
            [0, SOURCE_USER_ACTION, 0, 0, 0],
        )
    }

    fn minimize_frontmost_window(&mut self) -> Result<()> {
        let window = self.active_window()?;
        info!("Minimizing window {window:#010x}");
        self.send_client_message(window, self.atoms.wm_change_state, [ICONIC_STATE, 0, 0, 0, 0])
    }

    fn full_screen_frontmost_window(&mut self) -> Result<()> {
        let window = self.active_window()?;
        info!("Making window {window:#010x} full screen");
        self.send_client_message(
            window,
            self.atoms.net_wm_state,
            [
                NET_WM_STATE_ADD,
                self.atoms.net_wm_state_fullscreen,
                0,
                SOURCE_USER_ACTION,
                0,
            ],
        )
    }

    fn pickup_window(&mut self) -> Result<()> {
        let window = self.active_window()?;
        let geometry = self
            .connection
            .get_geometry(window)
            .map_err(|e| AppError::WindowControl(format!("Failed to send geometry request: {e}")))?
            .reply()
            .map_err(|e| AppError::WindowControl(format!("Failed to read geometry: {e}")))?;

        info!(
            "Picked up window {window:#010x} ({}x{})",
            geometry.width, geometry.height
        );

        // Raise the window so the drag stays visible
        self.send_client_message(
            window,
            self.atoms.net_active_window,
            [SOURCE_USER_ACTION, 0, 0, 0, 0],
        )?;

        self.grabbed = Some(GrabbedWindow {
            window,
            width: geometry.width,
        });

        // Let the window manager finish restacking before moves stream in
        thread::sleep(Duration::from_millis(PICKUP_SETTLE_MS));

        Ok(())
    }

    fn drag_window(&mut self, target: Landmark) -> Result<()> {
        let grabbed = self
            .grabbed
            .ok_or_else(|| AppError::WindowControl("No window held for dragging".to_string()))?;

        // Track the fingertip with the title bar center
        let (pixel_x, pixel_y) = self.map_to_screen(target.x, target.y);
        let x = (pixel_x - i32::from(grabbed.width) / 2).max(0);
        let y = (pixel_y - DRAG_TITLEBAR_INSET_PX).max(0);

        debug!("Dragging window {:#010x} to ({x}, {y})", grabbed.window);

        let flags = MOVERESIZE_GRAVITY_NORTHWEST
            | MOVERESIZE_X_PRESENT
            | MOVERESIZE_Y_PRESENT
            | MOVERESIZE_SOURCE_USER;
        self.send_client_message(
            grabbed.window,
            self.atoms.net_moveresize_window,
            [
                flags,
                u32::try_from(x).unwrap_or(0),
                u32::try_from(y).unwrap_or(0),
                0,
                0,
            ],
        )
    }

    fn drop_window(&mut self) -> Result<()> {
        match self.grabbed.take() {
            Some(grabbed) => {
                info!("Dropped window {:#010x}", grabbed.window);
                Ok(())
            }
            None => Err(AppError::WindowControl("No window held to drop".to_string())),
        }
    }
}

/// Intern one atom by name
fn intern(connection: &RustConnection, name: &str) -> Result<Atom> {
    let reply = connection
        .intern_atom(false, name.as_bytes())
        .map_err(|e| AppError::WindowControl(format!("Failed to send intern request: {e}")))?
        .reply()
        .map_err(|e| AppError::WindowControl(format!("Failed to intern atom {name}: {e}")))?;
    Ok(reply.atom)
}

/// Scale a normalized coordinate to a pixel offset within an extent
fn scale_to_pixels(normalized: f64, extent: u16) -> i32 {
    let limit = i32::from(extent).saturating_sub(1);
    f64_to_i32_clamp(normalized * f64::from(extent), 0, limit)
}

/// Dry-run implementation that logs commands instead of executing them.
///
/// Used with `--dry-run` and as the fallback when no X11 display is
/// available, so the gesture pipeline stays exercisable headless.
#[derive(Debug, Default)]
pub struct LoggingWindowControl {
    holding: bool,
}

impl LoggingWindowControl {
    /// Create a new logging controller
    #[must_use]
    pub const fn new() -> Self {
        Self { holding: false }
    }
}

impl WindowControl for LoggingWindowControl {
    fn close_frontmost_window(&mut self) -> Result<()> {
        info!("Dry run: close frontmost window");
        Ok(())
    }

    fn minimize_frontmost_window(&mut self) -> Result<()> {
        info!("Dry run: minimize frontmost window");
        Ok(())
    }

    fn full_screen_frontmost_window(&mut self) -> Result<()> {
        info!("Dry run: full screen frontmost window");
        Ok(())
    }

    fn pickup_window(&mut self) -> Result<()> {
        info!("Dry run: pick up frontmost window");
        self.holding = true;
        Ok(())
    }

    fn drag_window(&mut self, target: Landmark) -> Result<()> {
        if !self.holding {
            return Err(AppError::WindowControl(
                "No window held for dragging".to_string(),
            ));
        }
        debug!("Dry run: drag window to ({:.3}, {:.3})", target.x, target.y);
        Ok(())
    }

    fn drop_window(&mut self) -> Result<()> {
        if !self.holding {
            return Err(AppError::WindowControl("No window held to drop".to_string()));
        }
        info!("Dry run: drop window");
        self.holding = false;
        Ok(())
    }
}
