// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use {
    clap::{Arg, ArgMatches, Command},
    log::{warn, LevelFilter},
    p7s_extract::{summarize, ExtractSettings, P7sError},
};

const EXTRACT_ABOUT: &str = "\
Extract the embedded content of a .p7s file.

A .p7s file is a PKCS #7 / CMS SignedData structure. When the signature is
attached, the document that was signed is stored inside the structure. This
command writes that document to a file.

Both binary (DER/BER) and PEM armored files are accepted.

By default the output path is the input path with its .p7s extension
removed. e.g. `contract.pdf.p7s` is extracted to `contract.pdf`. If the
input doesn't have a .p7s extension, `.bin` is appended to its name.

An existing output file is not overwritten unless --force is given.

IMPORTANT: signatures are NOT verified. A successful extraction says nothing
about who signed the content or whether the signature is valid.
";

const INFO_ABOUT: &str = "\
Print information about a .p7s file.

This prints the type, size, and SHA-256 digest of the embedded content along
with the embedded certificates and signers. Signatures are not verified.
";

fn command_extract(args: &ArgMatches) -> Result<(), P7sError> {
    let input = args.value_of("input").ok_or(P7sError::CliBadArgument)?;

    let mut settings = ExtractSettings::new(input);

    if let Some(path) = args.value_of("output") {
        settings.set_output(path);
    }
    if let Some(path) = args.value_of("output_dir") {
        settings.set_output_dir(path);
    }
    settings.set_force(args.is_present("force"));

    if settings.force() {
        warn!("existing output files will be overwritten");
    }

    let (output, length) = settings.extract_file()?;

    warn!("extracted {} bytes to {}", length, output.display());

    Ok(())
}

fn command_info(args: &ArgMatches) -> Result<(), P7sError> {
    let input = args.value_of("input").ok_or(P7sError::CliBadArgument)?;

    let path = ExtractSettings::new(input).check_input()?;
    let data = std::fs::read(&path).map_err(|source| P7sError::ReadInput {
        path: path.clone(),
        source,
    })?;

    print!("{}", summarize(&data)?);

    Ok(())
}

fn main_impl() -> Result<(), P7sError> {
    let app = Command::new("p7s Extract")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gregory Szorc <gregory.szorc@gmail.com>")
        .about("Extract the embedded content of PKCS #7 / CMS SignedData (.p7s) files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .multiple_occurrences(true)
                .help("Increase logging verbosity. Can be specified multiple times."),
        );

    let app = app.subcommand(
        Command::new("extract")
            .about("Extract the embedded content of a .p7s file")
            .long_about(EXTRACT_ABOUT)
            .arg(
                Arg::new("input")
                    .required(true)
                    .help("Path to .p7s file to extract content from"),
            )
            .arg(
                Arg::new("output")
                    .long("output")
                    .short('o')
                    .takes_value(true)
                    .help("Path to write extracted content to"),
            )
            .arg(
                Arg::new("output_dir")
                    .long("output-dir")
                    .takes_value(true)
                    .conflicts_with("output")
                    .help("Directory to write extracted content to, using the derived file name"),
            )
            .arg(
                Arg::new("force")
                    .long("force")
                    .short('f')
                    .help("Overwrite the output file if it exists"),
            ),
    );

    let app = app.subcommand(
        Command::new("info")
            .about("Print information about a .p7s file")
            .long_about(INFO_ABOUT)
            .arg(
                Arg::new("input")
                    .required(true)
                    .help("Path to .p7s file to examine"),
            ),
    );

    let matches = app.get_matches();

    let log_level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    );

    // Disable log context except at higher log levels.
    if log_level <= LevelFilter::Info {
        builder
            .format_timestamp(None)
            .format_level(false)
            .format_target(false);
    }

    builder.init();

    match matches.subcommand() {
        Some(("extract", args)) => command_extract(args),
        Some(("info", args)) => command_info(args),
        _ => Err(P7sError::CliUnknownCommand),
    }
}

fn main() {
    let exit_code = match main_impl() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {}", err);
            1
        }
    };

    std::process::exit(exit_code)
}
