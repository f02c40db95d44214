use std::{env, fs, path::PathBuf};

/// Long option taking a value, named the way the derived parser spells it.
fn value_arg(long: &'static str, value_name: &'static str, help: &'static str) -> clap::Arg {
    clap::Arg::new(long).long(long).value_name(value_name).help(help)
}

fn path_arg(long: &'static str, value_name: &'static str, help: &'static str) -> clap::Arg {
    value_arg(long, value_name, help).value_parser(clap::value_parser!(PathBuf))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("w3scrape")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract tutorial topics from W3Schools pages")
        .arg(clap::arg!([INPUT] "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(clap::arg!(-t --tutorial <NAME> "Start at the root of a tutorial").value_name("NAME"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (json, markdown, text)")
                .value_name("FORMAT")
                .default_value("json")
                .value_parser(["json", "markdown", "text"]),
        )
        .arg(clap::arg!(--pages <N> "Number of pages to walk").default_value("1"))
        .arg(clap::arg!(--previous "Walk towards previous pages instead of next ones"))
        .arg(value_arg("base-url", "URL", "Base URL for image sources and pagination links"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("3"))
        .arg(clap::arg!(--retries <N> "Attempts per page before giving up on it").default_value("5"))
        .arg(value_arg("user-agent", "UA", "Custom User-Agent for HTTP requests"))
        .arg(path_arg("user-agent-file", "FILE", "Read the User-Agent from a file"))
        .arg(
            clap::Arg::new("render-images")
                .long("render-images")
                .action(clap::ArgAction::SetTrue)
                .help("Capture embedded divs as PNG images with wkhtmltoimage"),
        )
        .arg(path_arg("image-dir", "DIR", "Directory rendered images are written to"))
        .arg(
            clap::arg!(--stylesheet <FILE> "Stylesheet applied when rendering images")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(path_arg("save-html", "FILE", "Save the first page's content container as HTML"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_name("SHELL")
                .value_parser(["bash", "zsh", "fish", "powershell"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "w3scrape", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "w3scrape", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "w3scrape", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "w3scrape", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
