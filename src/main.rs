use std::env;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!("Usage: caged [--key <name>] [output.yaml]");
    eprintln!("       Emits the reference-key fretboard tables as YAML,");
    eprintln!("       transposed to <name> (e.g. F#) when --key is given.");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut key_name: Option<&String> = None;
    let mut output_path: Option<&String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--key" => {
                i += 1;
                match args.get(i) {
                    Some(name) => key_name = Some(name),
                    None => {
                        eprintln!("--key requires a value");
                        print_usage();
                        process::exit(1);
                    }
                }
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            flag if flag.starts_with('-') => {
                eprintln!("Unknown flag '{}'", flag);
                print_usage();
                process::exit(1);
            }
            _ => {
                if output_path.is_some() {
                    print_usage();
                    process::exit(1);
                }
                output_path = Some(&args[i]);
            }
        }
        i += 1;
    }

    let key = match key_name {
        Some(name) => match caged::parse_key(name) {
            Ok(key) => key,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => 0,
    };

    let tables = caged::build_tables();
    let tables = if key == 0 { tables } else { tables.shifted(key) };

    let yaml = match caged::tables_to_yaml(&tables) {
        Ok(yaml) => yaml,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &yaml) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote tables to {}", path);
        }
        None => {
            println!("{}", yaml);
        }
    }
}
