fn main() {
    // ESP-IDF build environment propagation is only meaningful when the
    // espidf feature (and toolchain) is in play; host test builds skip it.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some()
        && std::env::var("TARGET").is_ok_and(|t| t.contains("espidf"))
    {
        embuild::espidf::sysenv::output();
    }
}
