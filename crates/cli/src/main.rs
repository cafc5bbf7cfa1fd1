fn main() -> std::process::ExitCode {
    whatcanicook_cli::run()
}
