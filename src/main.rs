use anyhow::{anyhow, Result};
use campaign_wizard::app::{App as CampaignApp, Command};
use campaign_wizard::config::Config;
use campaign_wizard::logger;
use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use std::path::PathBuf;

fn draft_arg() -> Arg<'static, 'static> {
    Arg::with_name("draft")
        .help("Path to a draft saved as JSON")
        .required(true)
        .index(1)
}

fn command_from(matches: &ArgMatches) -> Result<Command> {
    let draft = |sub: Option<&ArgMatches>| -> Result<PathBuf> {
        sub.and_then(|m| m.value_of("draft"))
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("A draft file is required"))
    };
    match matches.subcommand() {
        ("steps", _) => Ok(Command::Steps),
        ("validate", sub) => Ok(Command::Validate { path: draft(sub)? }),
        ("payload", sub) => Ok(Command::Payload { path: draft(sub)? }),
        ("save", sub) => Ok(Command::Save { path: draft(sub)? }),
        ("publish", sub) => Ok(Command::Publish { path: draft(sub)? }),
        ("show", sub) => sub
            .and_then(|m| m.value_of("id"))
            .map(|id| Command::Show { id: id.to_string() })
            .ok_or_else(|| anyhow!("A campaign id is required")),
        (other, _) => Err(anyhow!("Unknown command '{}'", other)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = App::new("campaign-wizard")
        .version(crate_version!())
        .about("Build, validate and submit merchant deal campaigns")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .subcommand(SubCommand::with_name("steps").about("List the wizard steps and their routes"))
        .subcommand(
            SubCommand::with_name("validate")
                .about("Print the validation status of a draft")
                .arg(draft_arg()),
        )
        .subcommand(
            SubCommand::with_name("payload")
                .about("Print the API payload built from a draft")
                .arg(draft_arg()),
        )
        .subcommand(
            SubCommand::with_name("show")
                .about("Load a campaign from the API")
                .arg(
                    Arg::with_name("id")
                        .help("Campaign id")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            SubCommand::with_name("save")
                .about("Save a draft to the API")
                .arg(draft_arg()),
        )
        .subcommand(
            SubCommand::with_name("publish")
                .about("Submit a draft for review")
                .arg(draft_arg()),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    logger::init(config.level_filter()?)?;

    let command = command_from(&matches)?;
    CampaignApp::start(config, command).await
}
