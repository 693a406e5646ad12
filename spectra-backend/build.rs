use std::{env, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-env-changed=FFTW_LIB_DIR");

    if env::var_os("CARGO_FEATURE_FFTW").is_none() {
        return;
    }

    if let Some(dir) = env::var_os("FFTW_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", PathBuf::from(dir).display());
    }
    if env::var_os("CARGO_FEATURE_FFTW_THREADS").is_some() {
        println!("cargo:rustc-link-lib=fftw3_threads");
    }
    println!("cargo:rustc-link-lib=fftw3");
}
