fn main() {
    #[cfg(feature = "cli")]
    romweave::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("romweave: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
