// Debug output for the face engine.
//
// On the board this goes out through esp-println like the rest of the firmware.
// Host builds have no console backend, so the macro only type-checks its
// arguments and compiles to nothing.

cfg_if::cfg_if! {
    if #[cfg(feature = "esp32s3")] {
        macro_rules! debug_println {
            ($($arg:tt)*) => {
                esp_println::println!($($arg)*)
            };
        }
    } else {
        macro_rules! debug_println {
            ($($arg:tt)*) => {{
                let _ = format_args!($($arg)*);
            }};
        }
    }
}

pub(crate) use debug_println;
