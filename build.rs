use std::error::Error;
use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    let emitted = EmitBuilder::builder()
        .fail_on_error()
        .all_git()
        .git_describe(true, true, None)
        .emit();
    // Builds outside a git checkout still need a version suffix
    if emitted.is_err() {
        println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE=unknown");
    }
    Ok(())
}
