fn main() {
    console_error_panic_hook::set_once();
    rootreach_storefront::page::start();
}
