fn main() {
    // ESP-IDF link-time environment is only relevant when building the
    // on-device binary; host builds (lib + tests) skip it.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
