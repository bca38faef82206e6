//! Translation of key names from the binding tables into X keysyms.
use x11_dl::keysym;

pub type XKeysym = u32;

/// Look up the keysym for a key name as written in a binding table. Names
/// follow the X convention: single characters for letters and digits,
/// capitalised words for specials (`Return`, `F1`, ...).
#[must_use]
pub fn into_keysym(key: &str) -> Option<XKeysym> {
    let sym = match key {
        "a" => keysym::XK_a,
        "b" => keysym::XK_b,
        "c" => keysym::XK_c,
        "d" => keysym::XK_d,
        "e" => keysym::XK_e,
        "f" => keysym::XK_f,
        "g" => keysym::XK_g,
        "h" => keysym::XK_h,
        "i" => keysym::XK_i,
        "j" => keysym::XK_j,
        "k" => keysym::XK_k,
        "l" => keysym::XK_l,
        "m" => keysym::XK_m,
        "n" => keysym::XK_n,
        "o" => keysym::XK_o,
        "p" => keysym::XK_p,
        "q" => keysym::XK_q,
        "r" => keysym::XK_r,
        "s" => keysym::XK_s,
        "t" => keysym::XK_t,
        "u" => keysym::XK_u,
        "v" => keysym::XK_v,
        "w" => keysym::XK_w,
        "x" => keysym::XK_x,
        "y" => keysym::XK_y,
        "z" => keysym::XK_z,
        "0" => keysym::XK_0,
        "1" => keysym::XK_1,
        "2" => keysym::XK_2,
        "3" => keysym::XK_3,
        "4" => keysym::XK_4,
        "5" => keysym::XK_5,
        "6" => keysym::XK_6,
        "7" => keysym::XK_7,
        "8" => keysym::XK_8,
        "9" => keysym::XK_9,
        "F1" => keysym::XK_F1,
        "F2" => keysym::XK_F2,
        "F3" => keysym::XK_F3,
        "F4" => keysym::XK_F4,
        "F5" => keysym::XK_F5,
        "F6" => keysym::XK_F6,
        "F7" => keysym::XK_F7,
        "F8" => keysym::XK_F8,
        "F9" => keysym::XK_F9,
        "F10" => keysym::XK_F10,
        "F11" => keysym::XK_F11,
        "F12" => keysym::XK_F12,
        "Return" | "Enter" => keysym::XK_Return,
        "Escape" => keysym::XK_Escape,
        "Tab" => keysym::XK_Tab,
        "space" | "Space" => keysym::XK_space,
        "BackSpace" => keysym::XK_BackSpace,
        "Delete" => keysym::XK_Delete,
        "Home" => keysym::XK_Home,
        "End" => keysym::XK_End,
        "Up" => keysym::XK_Up,
        "Down" => keysym::XK_Down,
        "Left" => keysym::XK_Left,
        "Right" => keysym::XK_Right,
        "Page_Up" => keysym::XK_Page_Up,
        "Page_Down" => keysym::XK_Page_Down,
        "comma" => keysym::XK_comma,
        "period" => keysym::XK_period,
        "slash" => keysym::XK_slash,
        "semicolon" => keysym::XK_semicolon,
        "minus" => keysym::XK_minus,
        "equal" => keysym::XK_equal,
        _ => return None,
    };
    Some(sym)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_specials_resolve() {
        assert_eq!(into_keysym("j"), Some(keysym::XK_j));
        assert_eq!(into_keysym("Return"), Some(keysym::XK_Return));
        assert_eq!(into_keysym("1"), Some(keysym::XK_1));
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        assert_eq!(into_keysym("NoSuchKey"), None);
        assert_eq!(into_keysym(""), None);
    }
}
