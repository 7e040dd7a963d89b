// Reads one calculate command as JSON on stdin and prints the result.
fn main() -> std::process::ExitCode {
    dosage_engine_lib::run()
}
