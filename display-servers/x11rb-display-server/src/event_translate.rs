//! Translate x11rb events into the reducer's vocabulary.
use x11rb::protocol::{xproto, Event};
use zipwm_core::utils::modmask_lookup::{Button, ModMask};
use zipwm_core::models::WindowId;
use zipwm_core::{ConfigureRequest, DisplayEvent};

use crate::error::Result;
use crate::xwrap::XWrap;

const SEND_EVENT_MASK: u8 = 0x80;

pub(crate) fn translate(event: &Event, xw: &mut XWrap) -> Option<DisplayEvent> {
    let result: Result<Option<DisplayEvent>> = match event {
        Event::MapRequest(e) => xw.setup_window(e.window),
        Event::UnmapNotify(e) => Ok(Some(DisplayEvent::UnmapNotify(
            WindowId(e.window),
            e.response_type & SEND_EVENT_MASK != 0,
        ))),
        Event::DestroyNotify(e) => {
            xw.teardown_managed_window(e.window);
            Ok(Some(DisplayEvent::WindowDestroy(WindowId(e.window))))
        }
        Event::ConfigureRequest(e) => Ok(Some(from_configure_request(e))),
        Event::ConfigureNotify(e) if e.window == xw.root() => {
            xw.get_screens().map(|s| Some(DisplayEvent::ScreensChanged(s)))
        }
        Event::EnterNotify(e) => Ok(from_enter_notify(e, xw)),
        Event::KeyPress(e) => Ok(Some(DisplayEvent::KeyCombo(
            strip_button_bits(e.state),
            xw.keycode_to_keysym(e.detail),
        ))),
        Event::ButtonPress(e) => Ok(Some(DisplayEvent::MouseCombo(
            strip_button_bits(e.state),
            Button::from(e.detail),
            WindowId(e.event),
            i32::from(e.root_x),
            i32::from(e.root_y),
        ))),
        Event::MotionNotify(e) => Ok(Some(DisplayEvent::Motion(
            i32::from(e.root_x),
            i32::from(e.root_y),
        ))),
        Event::ButtonRelease(_) => Ok(Some(DisplayEvent::ButtonRelease)),
        Event::ClientMessage(e) if e.type_ == xw.atoms.WMProtocols => {
            let protocol = e.data.as_data32()[0];
            Ok(Some(DisplayEvent::ClientMessage(
                WindowId(e.window),
                protocol,
            )))
        }
        Event::MappingNotify(_) => {
            if let Err(err) = xw.refresh_keyboard() {
                tracing::error!("could not refresh the keyboard mapping: {err}");
            }
            Ok(None)
        }
        Event::Error(e) => {
            from_x_error(e);
            Ok(None)
        }
        _ => Ok(None),
    };
    match result {
        Ok(display_event) => display_event,
        Err(e) => {
            tracing::error!("an error occurred when processing {event:?}: {e}");
            None
        }
    }
}

fn from_configure_request(event: &xproto::ConfigureRequestEvent) -> DisplayEvent {
    DisplayEvent::ConfigureRequest(ConfigureRequest {
        window: WindowId(event.window),
        x: i32::from(event.x),
        y: i32::from(event.y),
        w: u32::from(event.width),
        h: u32::from(event.height),
        border_width: u32::from(event.border_width),
        sibling: (event.sibling != x11rb::NONE).then_some(WindowId(event.sibling)),
        stack_mode: u32::from(event.stack_mode) as u8,
        value_mask: event.value_mask.into(),
    })
}

fn from_enter_notify(event: &xproto::EnterNotifyEvent, xw: &XWrap) -> Option<DisplayEvent> {
    if event.mode != xproto::NotifyMode::NORMAL
        || event.detail == xproto::NotifyDetail::INFERIOR
        || event.event == xw.root()
    {
        return None;
    }
    Some(DisplayEvent::EnterNotify(WindowId(event.event)))
}

/// Keep only the modifier bits of an event state; the reducer masks the
/// lock modifiers itself.
fn strip_button_bits(state: xproto::KeyButMask) -> ModMask {
    ModMask::from_bits_truncate(state.bits() & 0x00ff)
}

/// The permissive error policy: errors about windows that died under us are
/// expected and ignored, anything else is fatal.
fn from_x_error(error: &x11rb::x11_utils::X11Error) {
    use x11rb::protocol::ErrorKind;
    match error.error_kind {
        ErrorKind::Window | ErrorKind::Drawable | ErrorKind::Match | ErrorKind::Access => {
            tracing::debug!("ignoring X error on a gone window: {error:?}");
        }
        _ => {
            tracing::error!("fatal X error: {error:?}");
            eprintln!("zipwm: fatal X error: {error:?}");
            std::process::exit(1);
        }
    }
}
