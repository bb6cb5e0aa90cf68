use dpanel::cli::run;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("DPANEL_LOG", "warn")).init();

    if let Err(e) = run() {
        // Check if this is an internal error (database corruption, I/O, etc.)
        let error_str: String = e.to_string();
        if error_str.contains("database") || error_str.contains("constraint") ||
           error_str.contains("corruption") || error_str.contains("SQLite") ||
           error_str.contains("Failed to") {
            log::error!("{:?}", e);
            eprintln!("Internal error: {}", e);
            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut indent = 1;
                while let Some(err) = source {
                    eprintln!("{:indent$}  {}", "", err);
                    source = err.source();
                    indent += 1;
                }
            }
            std::process::exit(2);
        } else {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
