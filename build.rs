// build.rs

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DISPLAY_DRIVER");

    // Declare custom cfg names to avoid warnings
    println!("cargo::rustc-check-cfg=cfg(use_x11_display)");
    println!("cargo::rustc-check-cfg=cfg(use_headless_display)");

    let target_os = std::env::var("CARGO_CFG_TARGET_OS")
        .expect("CARGO_CFG_TARGET_OS is not set, cannot determine target platform.");

    match determine_display_driver(&target_os).as_str() {
        "x11" => {
            println!("cargo:rustc-cfg=use_x11_display");
            // Probe for libX11 so a missing dev package surfaces a clear
            // message here instead of a bare linker error later.
            if let Err(e) = pkg_config::probe_library("x11") {
                eprintln!("Warning: failed to find library `x11`: {}", e);
                println!("cargo:rustc-link-lib=X11");
                println!("cargo:rustc-link-search=/usr/lib");
            }
        }
        "headless" => {
            println!("cargo:rustc-cfg=use_headless_display");
        }
        other => {
            panic!("Unknown display driver: {}", other);
        }
    }
}

/// Pick the default backend for `FullScreen::new()`.
///
/// `DISPLAY_DRIVER` overrides everything; otherwise the `display_x11` feature
/// selects X11 on Linux, and anything else falls back to headless.
fn determine_display_driver(target_os: &str) -> String {
    if let Ok(driver) = std::env::var("DISPLAY_DRIVER") {
        return driver.to_lowercase();
    }

    let has_x11 = std::env::var("CARGO_FEATURE_DISPLAY_X11").is_ok();
    let has_headless = std::env::var("CARGO_FEATURE_DISPLAY_HEADLESS").is_ok();

    if has_headless && !has_x11 {
        return "headless".to_string();
    }
    if has_x11 && target_os == "linux" {
        return "x11".to_string();
    }

    "headless".to_string()
}
