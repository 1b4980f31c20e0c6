use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "signup", version, about = "Terminal sign-up form")]
pub struct Cli {
    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Run the interactive form
    Run(RunArgs),
    /// Validate and submit a form without the terminal UI
    Submit(SubmitArgs),
    /// List selectable regions and their dial codes
    Regions {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Backend URL the form is posted to
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
    /// Ticks per second
    #[arg(long, value_name = "FLOAT")]
    pub tick_rate: Option<f64>,
    /// Frames per second
    #[arg(long, value_name = "FLOAT")]
    pub frame_rate: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    /// Region name as listed by `signup regions` (case-insensitive)
    #[arg(long)]
    pub region: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["signup"]).unwrap();
        assert!(cli.cmd.is_none());
    }

    #[test]
    fn submit_parses_all_fields() {
        let cli = Cli::try_parse_from([
            "signup",
            "submit",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--region",
            "united kingdom",
            "--phone",
            "2071234567",
            "--email",
            "ada@example.com",
        ])
        .unwrap();
        match cli.cmd {
            Some(Cmd::Submit(args)) => {
                assert_eq!(args.first_name, "Ada");
                assert_eq!(args.region, "united kingdom");
                assert!(args.endpoint.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
