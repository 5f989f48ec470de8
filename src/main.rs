use clap::Parser;
use folio::domain::ports::{FragmentSink, SiteSettings};
use folio::utils::logger;
use folio::{CliConfig, HttpContentSource, LocalStorage, Page};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting folio prerender");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    let source = HttpContentSource::new(settings.base_url());
    let sink = LocalStorage::new(settings.output_path().to_string());
    let mut page = Page::new(settings.site.page_config()?);

    let report = page.hydrate(&source, &settings.site.resources()).await;

    let fragments = [
        (report.technologies, "technologies.html", page.technologies.html()),
        (report.projects, "projects.html", page.projects.html()),
        (report.experience, "experience.html", page.experience.html()),
    ];

    let mut written = 0;
    for (rendered, name, html) in fragments {
        if !rendered {
            continue;
        }
        sink.write_fragment(name, html).await?;
        tracing::info!("Wrote {}", name);
        written += 1;
    }

    if report.all_failed() {
        eprintln!("❌ No content section could be rendered");
        std::process::exit(1);
    }

    println!(
        "✅ Prerendered {} of 3 sections to {}",
        written,
        settings.output_path()
    );
    Ok(())
}
