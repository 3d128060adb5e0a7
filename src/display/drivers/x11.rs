// src/display/drivers/x11.rs
//! X11 full-screen SurfaceDriver using xlib.
//!
//! Claims the whole output with a root-sized override-redirect window:
//! the window manager and compositor are bypassed, which is the closest
//! Xlib analog of an exclusive full-screen mode. Frames go out via
//! XPutImage; pacing to the refresh interval is done by `FrameClock` after
//! XSync has drained the request queue.

use crate::config::{DisplayConfig, TimingConfig};
use crate::display::driver::SurfaceDriver;
use crate::error::ScreenError;
use crate::vsync::FrameClock;
use log::{info, trace};
use std::ffi::CString;
use std::os::raw::{c_char, c_int, c_uint};
use std::ptr;
use x11::xlib;

pub struct X11SurfaceDriver {
    display: *mut xlib::Display,
    window: xlib::Window,
    gc: xlib::GC,
    visual: *mut xlib::Visual,
    depth: c_int,
    blank_cursor: Option<xlib::Cursor>,
    width_px: u32,
    height_px: u32,
    clock: FrameClock,
}

impl X11SurfaceDriver {
    /// Open the configured display, switch it to full-screen presentation
    /// and read its native geometry.
    pub fn open(display: &DisplayConfig, timing: &TimingConfig) -> Result<Self, ScreenError> {
        let name = match &display.monitor {
            Some(name) => Some(CString::new(name.as_str()).map_err(|_| {
                ScreenError::DisplayUnavailable(format!("invalid display name {:?}", name))
            })?),
            None => None,
        };
        let name_ptr = name.as_ref().map_or(ptr::null(), |n| n.as_ptr());

        unsafe {
            let dpy = xlib::XOpenDisplay(name_ptr);
            if dpy.is_null() {
                return Err(ScreenError::DisplayUnavailable(format!(
                    "cannot open X display {:?} (is DISPLAY set?)",
                    display.monitor
                )));
            }

            let screen = xlib::XDefaultScreen(dpy);
            let depth = xlib::XDefaultDepth(dpy, screen);
            if depth != 24 && depth != 32 {
                xlib::XCloseDisplay(dpy);
                return Err(ScreenError::DisplayUnavailable(format!(
                    "unsupported default depth {} (need 24 or 32)",
                    depth
                )));
            }

            let root = xlib::XRootWindow(dpy, screen);
            let visual = xlib::XDefaultVisual(dpy, screen);
            let width_px = xlib::XDisplayWidth(dpy, screen) as u32;
            let height_px = xlib::XDisplayHeight(dpy, screen) as u32;

            let mut attrs: xlib::XSetWindowAttributes = std::mem::zeroed();
            attrs.override_redirect = xlib::True;
            attrs.background_pixel = xlib::XBlackPixel(dpy, screen);

            let window = xlib::XCreateWindow(
                dpy,
                root,
                0,
                0,
                width_px as c_uint,
                height_px as c_uint,
                0,
                xlib::CopyFromParent,
                xlib::InputOutput as c_uint,
                visual,
                xlib::CWOverrideRedirect | xlib::CWBackPixel,
                &mut attrs,
            );
            if window == 0 {
                xlib::XCloseDisplay(dpy);
                return Err(ScreenError::DisplayUnavailable(
                    "failed to create full-screen window".to_string(),
                ));
            }

            let gc = xlib::XCreateGC(dpy, window, 0, ptr::null_mut());
            xlib::XMapRaised(dpy, window);

            let blank_cursor = if display.hide_cursor {
                let cursor = create_blank_cursor(dpy, window);
                xlib::XDefineCursor(dpy, window, cursor);
                Some(cursor)
            } else {
                None
            };

            xlib::XSync(dpy, xlib::False);

            info!(
                "X11SurfaceDriver: claimed {}x{} px output at depth {}",
                width_px, height_px, depth
            );

            Ok(Self {
                display: dpy,
                window,
                gc,
                visual,
                depth,
                blank_cursor,
                width_px,
                height_px,
                clock: FrameClock::new(timing.refresh_rate_hz, timing.present_timeout_intervals),
            })
        }
    }
}

/// 1x1 transparent pixmap cursor, the xlib way of hiding the pointer.
unsafe fn create_blank_cursor(dpy: *mut xlib::Display, window: xlib::Window) -> xlib::Cursor {
    let pixmap = xlib::XCreatePixmap(dpy, window, 1, 1, 1);
    let mut color: xlib::XColor = std::mem::zeroed();
    let cursor = xlib::XCreatePixmapCursor(dpy, pixmap, pixmap, &mut color, &mut color, 0, 0);
    xlib::XFreePixmap(dpy, pixmap);
    cursor
}

impl SurfaceDriver for X11SurfaceDriver {
    fn geometry(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    fn present(&mut self, native: &[u8]) -> Result<(), ScreenError> {
        trace!("X11SurfaceDriver: presenting frame");
        unsafe {
            let image = xlib::XCreateImage(
                self.display,
                self.visual,
                self.depth as u32,
                xlib::ZPixmap,
                0,
                native.as_ptr() as *mut c_char,
                self.width_px,
                self.height_px,
                32,
                0,
            );
            if image.is_null() {
                return Err(ScreenError::DisplayUnavailable(
                    "XCreateImage failed".to_string(),
                ));
            }

            xlib::XPutImage(
                self.display,
                self.window,
                self.gc,
                image,
                0,
                0,
                0,
                0,
                self.width_px,
                self.height_px,
            );

            // The XImage borrows the caller's buffer; detach before destroy.
            (*image).data = ptr::null_mut();
            xlib::XDestroyImage(image);

            // Drain the request queue so the server holds the frame before
            // we pace to the next refresh boundary.
            xlib::XSync(self.display, xlib::False);
        }

        self.clock.wait_for_vblank()
    }
}

impl Drop for X11SurfaceDriver {
    fn drop(&mut self) {
        unsafe {
            if let Some(cursor) = self.blank_cursor.take() {
                xlib::XUndefineCursor(self.display, self.window);
                xlib::XFreeCursor(self.display, cursor);
            }
            xlib::XFreeGC(self.display, self.gc);
            xlib::XDestroyWindow(self.display, self.window);
            xlib::XCloseDisplay(self.display);
        }
        info!("X11SurfaceDriver: released display");
    }
}
