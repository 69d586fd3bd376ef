fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    herostage::run();

    // On wasm32 the entry point is `run` in lib.rs.
}
