use pico_args::Arguments;
use shadergen::Options;
use std::{path::PathBuf, process::exit};

fn print_help() {
    println!(
        r#"
shadergen
Bundles a tree of GLSL fragments into a single generated C++ header.

USAGE:
    shadergen -d <NAME> -n <NAME> [-r <DIR>] [-f <PATH>]

OPTIONS:
    -d, --declaration <NAME>  Include guard base name (without the _H suffix)
    -n, --namespace <NAME>    Namespace enclosing the generated declarations
    -r, --route <DIR>         Root of the fragment tree to walk [default: .]
    -f, --file <PATH>         Output header path [default: exit.h]
    -h, --help                Print this text
"#
    );
}

/// `Ok(None)` means a required option is absent; `Err` means an option was
/// present but malformed (e.g. a flag with no value).
fn parse_options(args: &mut Arguments) -> Result<Option<Options>, pico_args::Error> {
    let Some(declaration) = args.opt_value_from_str(["-d", "--declaration"])? else {
        return Ok(None);
    };
    let Some(namespace) = args.opt_value_from_str(["-n", "--namespace"])? else {
        return Ok(None);
    };
    let route = args
        .opt_value_from_str(["-r", "--route"])?
        .unwrap_or_else(|| PathBuf::from("."));
    let output = args
        .opt_value_from_str(["-f", "--file"])?
        .unwrap_or_else(|| PathBuf::from("exit.h"));

    Ok(Some(Options {
        declaration,
        namespace,
        route,
        output,
    }))
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let mut args = Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print_help();
        return;
    }

    let options = match parse_options(&mut args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("\nMissing required options.");
            print_help();
            exit(1);
        }
        Err(_) => {
            println!("\nWrong arguments.");
            print_help();
            exit(1);
        }
    };

    if !args.finish().is_empty() {
        println!("\nWrong arguments.");
        print_help();
        exit(1);
    }

    if let Err(e) = shadergen::run(&options) {
        log::error!("{e:#}");
        exit(1);
    }

    println!("\nDone\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn arguments(values: &[&str]) -> Arguments {
        Arguments::from_vec(values.iter().map(OsString::from).collect())
    }

    #[test]
    fn required_pair_alone_gets_the_defaults() {
        let options = parse_options(&mut arguments(&["-d", "RETO", "-n", "reto"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.declaration, "RETO");
        assert_eq!(options.namespace, "reto");
        assert_eq!(options.route, PathBuf::from("."));
        assert_eq!(options.output, PathBuf::from("exit.h"));
    }

    #[test]
    fn missing_declaration_is_rejected() {
        let parsed = parse_options(&mut arguments(&["-n", "reto"])).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn missing_namespace_is_rejected() {
        let parsed = parse_options(&mut arguments(&["-d", "RETO"])).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn all_options_override_the_defaults() {
        let options = parse_options(&mut arguments(&[
            "-d", "RETO", "-n", "reto", "-r", "shaders", "-f", "gen.h",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(options.route, PathBuf::from("shaders"));
        assert_eq!(options.output, PathBuf::from("gen.h"));
    }

    #[test]
    fn option_without_a_value_is_a_parse_error() {
        let parsed = parse_options(&mut arguments(&["-d", "RETO", "-n", "reto", "-r"]));
        assert!(parsed.is_err());
    }
}
