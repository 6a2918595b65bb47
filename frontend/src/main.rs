fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    ingot_frontend::init_landing_page();
}
