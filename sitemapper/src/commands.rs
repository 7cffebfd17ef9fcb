use crate::CLAP_STYLING;
use clap::{ArgAction, arg, value_parser};

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitemapper")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitemapper")
        .about("Crawls a single domain and maps which pages link to which pages and assets")
        .styles(CLAP_STYLING)
        .arg(
            arg!([TARGET])
                .required(false)
                .help("The url to crawl. Prompted for when omitted"),
        )
        .arg(
            arg!(-l --"limit" <N>)
                .required(false)
                .allow_negative_numbers(true)
                .help("Maximum number of pages to fetch. Non-numeric values mean no limit"),
        )
        .arg(
            arg!(-d --"delay" <MS>)
                .required(false)
                .value_parser(value_parser!(u64))
                .default_value("500")
                .help("Milliseconds to wait between two page fetches"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .value_parser(value_parser!(u64))
                .default_value("10")
                .help("Per-request timeout in seconds"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Where to write the sitemap. Defaults to sitemap.<ext>, '-' writes to stdout"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .value_parser(["dot", "json", "text"])
                .default_value("dot")
                .help("Sitemap output format"),
        )
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-v --"verbose" "Increase log verbosity (-v info, -vv debug)")
                .required(false)
                .action(ArgAction::Count),
        )
}
