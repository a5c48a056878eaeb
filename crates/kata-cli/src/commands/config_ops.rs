use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn romaji_export() {
    print!("{}", kata_core::romaji::default_toml());
}

pub fn romaji_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(kata_core::romaji::parse_hepburn_toml(&content), "Error: {}");
    println!("OK: {} mappings", map.len());
}

pub fn settings_export() {
    print!("{}", kata_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        kata_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: debounce.delay_ms={}, translation.endpoint={}, translation.timeout_ms={}, theme.initial={:?}",
        s.debounce.delay_ms, s.translation.endpoint, s.translation.timeout_ms, s.theme.initial
    );
}
