pub mod alphabet;
pub mod annotation;
pub mod output;
pub mod structs;

#[cfg(test)]
#[ctor::ctor]
fn init_backtrace() {
    color_backtrace::install();
}
