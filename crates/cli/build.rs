use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let build_time = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .filter(|value| value.parse::<u64>().is_ok())
        .or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .ok()
                .map(|elapsed| elapsed.as_secs().to_string())
        })
        .unwrap_or_else(|| "undefined".to_string());
    let os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_else(|_| "undefined".to_string());
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_else(|_| "undefined".to_string());

    println!("cargo:rustc-env=GUEXT_BUILD_TIME={build_time}");
    println!("cargo:rustc-env=GUEXT_BUILDER_OS={os}");
    println!("cargo:rustc-env=GUEXT_BUILDER_ARCH={arch}");
}
