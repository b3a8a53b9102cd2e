use anyhow::{Context, Result};
use lookout_common::observability::init_logging;
use lookout_config::{LookoutConfig, LookoutConfigLoader};
use lookout_pipeline::{Category, Orchestrator, PersistedArtifact, Request, ResultPersister};

const BANNER: &str = r"
  _                _               _
 | |    ___   ___ | | __ ___  _  _| |_
 | |__ / _ \ / _ \| |/ // _ \| || |  _|
 |____|\___/ \___/|_|\_\\___/ \_,_|\__|
        open-source intelligence
";

const DISCLAIMER: &str = "\
Use Lookout only for lawful, authorized investigations.
Respect the privacy of the people you research and the terms of every platform queried.";

/// The fixed demonstration run: one request per category, each with the
/// artifact prefix it is saved under.
fn demo_requests() -> Vec<(Request, &'static str)> {
    vec![
        (
            Request::new(Category::SocialProfile)
                .param("username", "example_user")
                .param("query", "OSINT")
                .param("max_results", 5),
            "twitter_osint",
        ),
        (
            Request::new(Category::SocialSearch).param("query", "OSINT"),
            "twitter_search_osint",
        ),
        (
            Request::new(Category::MediaProfile).param("username", "example_user"),
            "instagram_osint",
        ),
        (
            Request::new(Category::WebSearch).param("query", "OSINT tools"),
            "web_osint",
        ),
        (
            Request::new(Category::EmailEnumeration).param("email", "example@email.com"),
            "email_osint",
        ),
    ]
}

/// Console line for one artifact; `Err` goes to stderr.
fn save_report(artifact: PersistedArtifact) -> Result<String, String> {
    artifact
        .into_result()
        .map(|path| format!("Results saved to {}", path.display()))
        .map_err(|e| format!("Failed to save results: {e}"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    println!("{BANNER}");
    println!("{DISCLAIMER}\n");

    // Env (LOOKOUT__*) wins over the file; a missing file is fine.
    let cfg: LookoutConfig = LookoutConfigLoader::new()
        .with_optional_file("lookout.yaml")
        .load()
        .context("failed to load configuration")?;

    let _log = init_logging(cfg.logging.to_log_config())?;
    tracing::info!("Lookout starting");

    let orchestrator = Orchestrator::from_config(&cfg);
    let persister = ResultPersister::new(&cfg.output.dir);

    for (request, prefix) in demo_requests() {
        let envelope = orchestrator.execute(request).await;
        match save_report(persister.persist(&envelope, prefix)) {
            Ok(line) => println!("{line}"),
            Err(line) => eprintln!("{line}"),
        }
    }

    tracing::info!("Lookout finished");
    Ok(())
}
