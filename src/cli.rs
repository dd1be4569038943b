use clap::Parser;

use crate::settings::Overrides;

const LONG_ABOUT: &str = "\
Translate a term using Wikipedia's interlanguage links.

Options affect the current query. If the query is omitted, or if '-save' is
given, the options are also saved to the settings file.";

const AFTER_LONG_HELP: &str = "\
OPTIONS:
  from=<code>          Set the search term language; it is added to the target languages
  to=<code>,<code>     Set the languages to translate to (replaces the saved list)

FLAGS:
  -save                Save the from/to options. Omitting the query also saves them.
  -settings            Print the settings file path and contents.

EXAMPLES:
  wt -settings              # print current settings
  wt egg salad              # translate 'egg salad' according to settings
  wt from=lv pelmeņi        # translate only this query from 'lv', leaving settings intact
  wt from=en to=es,fr,de    # update 'from' and 'to' settings since no query was provided
  wt coelho from=pt -save   # translate from 'pt', saving 'from=pt' to settings";

#[derive(Parser, Debug)]
#[command(
    name = "wt",
    version,
    about = "Translate a term using Wikipedia's interlanguage links",
    long_about = LONG_ABOUT,
    override_usage = "wt [from=lv] [to=en,fr,es] [-save] [-settings] [multi word query]",
    after_long_help = AFTER_LONG_HELP
)]
pub struct Cli {
    /// Options, flags and query words, in any order
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// What a single run was asked to do.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    pub overrides: Overrides,
    pub save: bool,
    pub print_settings: bool,
    pub query: String,
}

impl Invocation {
    /// Sorts tokens into options, flags and query words. Later options win.
    pub fn from_args(args: &[String]) -> Self {
        let mut invocation = Invocation::default();
        let mut words = Vec::new();

        for arg in args {
            match arg.as_str() {
                "-save" | "--save" => invocation.save = true,
                "-settings" | "--settings" => invocation.print_settings = true,
                _ => {
                    if let Some(code) = arg.strip_prefix("from=") {
                        invocation.overrides.from = Some(code.to_string());
                    } else if let Some(codes) = arg.strip_prefix("to=") {
                        invocation.overrides.to =
                            Some(codes.split(',').map(str::to_string).collect());
                    } else {
                        words.push(arg.as_str());
                    }
                }
            }
        }

        invocation.query = words.join(" ").trim().to_string();
        invocation
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }
}
