//! Configuration access port trait.

/// Typed access to configuration values. Getters other than [`get_string`]
/// take a default returned when the key is absent or unparseable.
///
/// [`get_string`]: ConfigPort::get_string
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}
