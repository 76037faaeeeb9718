//! gandi-domains - registrar toolkit on the command line
//!
//! Checks availability and pricing, suggests alternative names and manages
//! LiveDNS records through the Gandi v5 API.

use anyhow::bail;
use clap::{Parser, Subcommand};
use gandi_domains::{
    domain::validator::{base_name, parse_tld_list, with_default_tld},
    types::Price,
    ApiClient, CheckerConfig, ConfigPaths, DomainChecker, DomainProduct, GandiError,
    ListDomainsOptions, NewDnsRecord, ProductStatus, SuggestOptions, SuggestProgress,
    SuggestionPipeline, SuggestionRecord, SuggestionResult,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::process;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "gandi-domains")]
#[command(version, about = "Domain availability, DNS records and name suggestions for Gandi")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check availability and pricing of a domain (defaults to .com)
    Check {
        domain: Option<String>,
    },

    /// Suggest available alternatives for a name
    Suggest {
        /// Base name or domain; anything after the first dot is ignored
        name: Option<String>,

        /// Comma-separated TLDs replacing the configured ones
        #[arg(long)]
        tlds: Option<String>,

        /// Only check the exact name
        #[arg(long)]
        no_variations: bool,

        /// Skip the exact name and only check variations
        #[arg(long)]
        variations_only: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify the API token by listing organizations
    Auth,

    /// List domains in the account
    Domains {
        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        per_page: Option<u32>,

        /// Sort field, prefix with '-' for descending order
        #[arg(long)]
        sort_by: Option<String>,

        /// Organization to list domains for
        #[arg(long)]
        sharing_id: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Show details of a registered domain
    Domain {
        fqdn: String,

        #[arg(long)]
        json: bool,
    },

    /// List DNS records of a domain
    Records {
        fqdn: String,

        #[arg(long)]
        json: bool,
    },

    /// Show one DNS record set
    Record {
        fqdn: String,
        name: String,
        #[arg(value_name = "TYPE")]
        record_type: String,

        #[arg(long)]
        json: bool,
    },

    /// Create a DNS record set
    RecordCreate {
        fqdn: String,
        name: String,
        #[arg(value_name = "TYPE")]
        record_type: String,
        #[arg(required = true)]
        values: Vec<String>,

        /// Time to live in seconds
        #[arg(long)]
        ttl: Option<u32>,
    },

    /// Replace the values of a DNS record set
    RecordUpdate {
        fqdn: String,
        name: String,
        #[arg(value_name = "TYPE")]
        record_type: String,
        #[arg(required = true)]
        values: Vec<String>,

        /// Time to live in seconds
        #[arg(long)]
        ttl: Option<u32>,
    },

    /// Delete a DNS record set
    RecordDelete {
        fqdn: String,
        name: String,
        #[arg(value_name = "TYPE")]
        record_type: String,
    },
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gandi_domains=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gandi_domains=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env before the config directory is resolved
    if let Err(e) = gandi_domains::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let paths = ConfigPaths::from_env();
    if let Err(e) = run(cli.command, &paths).await {
        report_error(&e);
        process::exit(1);
    }
}

async fn run(command: Commands, paths: &ConfigPaths) -> anyhow::Result<()> {
    match command {
        Commands::Check { domain } => {
            let domain = require(domain, "gandi-domains check <domain>")?;
            run_check(paths, &domain).await
        }
        Commands::Suggest {
            name,
            tlds,
            no_variations,
            variations_only,
            json,
        } => {
            let name = require(name, "gandi-domains suggest <name> [--tlds com,net] [--json]")?;
            let options = SuggestOptions {
                tlds: tlds.map(|csv| parse_tld_list(&csv)).filter(|t| !t.is_empty()),
                no_variations,
                variations_only,
            };
            run_suggest(paths, &name, &options, json).await
        }
        Commands::Auth => {
            let client = ApiClient::from_config(paths)?;
            let organizations = client.test_auth().await?;
            println!("✅ Authenticated against {}", client.base_url());
            println!("🏢 Organizations ({}):", organizations.len());
            for org in &organizations {
                print!("   • {} ({})", org.name, org.id);
                if let Some(kind) = &org.kind {
                    print!(" [{}]", kind);
                }
                println!();
            }
            Ok(())
        }
        Commands::Domains {
            page,
            per_page,
            sort_by,
            sharing_id,
            json,
        } => {
            let client = ApiClient::from_config(paths)?;
            let options = ListDomainsOptions {
                page,
                per_page,
                sort_by,
                sharing_id,
            };
            let domains = client.list_domains(&options).await?;
            if json {
                return print_json(&domains);
            }
            if domains.is_empty() {
                println!("No domains found");
                return Ok(());
            }
            println!("🌐 Domains ({}):", domains.len());
            for domain in &domains {
                let expires = domain
                    .dates
                    .registry_ends_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("   {:<32} expires {}", domain.fqdn, expires);
            }
            Ok(())
        }
        Commands::Domain { fqdn, json } => {
            let client = ApiClient::from_config(paths)?;
            let detail = client.get_domain(&fqdn).await?;
            if json {
                return print_json(&detail);
            }
            println!("🌐 {}", detail.fqdn);
            if !detail.status.is_empty() {
                println!("   Status: {}", detail.status.join(", "));
            }
            if let Some(created) = detail.dates.created_at {
                println!("   Created: {}", created.format("%Y-%m-%d"));
            }
            if let Some(ends) = detail.dates.registry_ends_at {
                println!("   Expires: {}", ends.format("%Y-%m-%d"));
            }
            if let Some(enabled) = detail.autorenew.as_ref().and_then(|a| a.enabled) {
                println!("   Auto-renew: {}", if enabled { "on" } else { "off" });
            }
            if !detail.nameservers.is_empty() {
                println!("   Nameservers: {}", detail.nameservers.join(", "));
            }
            Ok(())
        }
        Commands::Records { fqdn, json } => {
            let client = ApiClient::from_config(paths)?;
            let records = client.list_dns_records(&fqdn).await?;
            if json {
                return print_json(&records);
            }
            println!("📋 DNS records for {} ({}):", fqdn, records.len());
            for record in &records {
                println!(
                    "   {:<24} {:<6} {:>7}  {}",
                    record.rrset_name,
                    record.rrset_type,
                    record.rrset_ttl.map_or_else(|| "-".to_string(), |t| t.to_string()),
                    record.rrset_values.join(" ")
                );
            }
            Ok(())
        }
        Commands::Record {
            fqdn,
            name,
            record_type,
            json,
        } => {
            let client = ApiClient::from_config(paths)?;
            let record = client.get_dns_record(&fqdn, &name, &record_type).await?;
            if json {
                return print_json(&record);
            }
            println!("📋 {} {} ({})", record.rrset_name, record.rrset_type, fqdn);
            if let Some(ttl) = record.rrset_ttl {
                println!("   TTL: {}", ttl);
            }
            for value in &record.rrset_values {
                println!("   {}", value);
            }
            Ok(())
        }
        Commands::RecordCreate {
            fqdn,
            name,
            record_type,
            values,
            ttl,
        } => {
            let client = ApiClient::from_config(paths)?;
            let record = NewDnsRecord {
                rrset_name: name,
                rrset_type: record_type,
                rrset_values: values,
                rrset_ttl: ttl,
            };
            client.create_dns_record(&fqdn, &record).await?;
            println!(
                "✅ Created {} {} on {}",
                record.rrset_name, record.rrset_type, fqdn
            );
            Ok(())
        }
        Commands::RecordUpdate {
            fqdn,
            name,
            record_type,
            values,
            ttl,
        } => {
            let client = ApiClient::from_config(paths)?;
            client
                .update_dns_record(&fqdn, &name, &record_type, &values, ttl)
                .await?;
            println!("✅ Updated {} {} on {}", name, record_type, fqdn);
            Ok(())
        }
        Commands::RecordDelete {
            fqdn,
            name,
            record_type,
        } => {
            let client = ApiClient::from_config(paths)?;
            client.delete_dns_record(&fqdn, &name, &record_type).await?;
            println!("🗑️  Deleted {} {} on {}", name, record_type, fqdn);
            Ok(())
        }
    }
}

fn require(arg: Option<String>, usage: &str) -> anyhow::Result<String> {
    match arg.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()) {
        Some(arg) => Ok(arg),
        None => bail!("Missing argument\nUsage: {}", usage),
    }
}

async fn run_check(paths: &ConfigPaths, input: &str) -> anyhow::Result<()> {
    let domain = with_default_tld(input);
    let checker = DomainChecker::new(ApiClient::from_config(paths)?);

    println!("🔍 Checking {}...", domain);
    let list = checker.check([domain.as_str()]).await?;

    if list.products.is_empty() {
        bail!("No results returned for {}", domain);
    }

    println!();
    for product in &list.products {
        print_product(product, list.currency.as_deref());
    }
    Ok(())
}

fn print_product(product: &DomainProduct, currency: Option<&str>) {
    match &product.status {
        ProductStatus::Available => {
            println!("✅ {} is AVAILABLE", product.name);
            for price in &product.prices {
                if let Some(line) = format_price(price, currency) {
                    println!("   💰 {}", line);
                }
            }
            if !product.process.is_empty() {
                println!("   🔧 Supports: {}", product.process.join(", "));
            }
            if let Some(tld) = &product.tld {
                println!("   🌐 TLD: .{}", tld);
            }
        }
        ProductStatus::Unavailable => println!("❌ {} is NOT available", product.name),
        ProductStatus::Pending => println!("⏳ {} is pending, try again later", product.name),
        ProductStatus::Error => println!(
            "⚠️  Error checking {}: {}",
            product.name,
            product.message.as_deref().unwrap_or("unknown error")
        ),
        ProductStatus::Other(status) => println!("❓ {}: {}", product.name, status),
    }

    if let Some(included) = product.taxes_included {
        println!("   Taxes included: {}", if included { "yes" } else { "no" });
    }
}

/// `"<unit>: <amount> <currency> (+ <taxes> tax)"`
fn format_price(price: &Price, fallback_currency: Option<&str>) -> Option<String> {
    let amount = price.price_after_taxes?;
    let currency = price.currency.as_deref().or(fallback_currency).unwrap_or("");
    let unit = price.duration_unit.as_deref().unwrap_or("period");

    let mut line = format!("{}: {} {}", unit, amount, currency).trim_end().to_string();
    if let Some(taxes) = price.taxes.filter(|t| *t > 0.0) {
        line.push_str(&format!(" (+ {} tax)", taxes));
    }
    Some(line)
}

async fn run_suggest(
    paths: &ConfigPaths,
    input: &str,
    options: &SuggestOptions,
    json: bool,
) -> anyhow::Result<()> {
    let base = base_name(input).to_string();
    if base.is_empty() {
        bail!("Invalid name '{}'", input);
    }

    let config = CheckerConfig::load(paths);
    let checker = DomainChecker::new(ApiClient::from_config(paths)?);
    let pipeline = SuggestionPipeline::new(&checker, &config);

    let spinner = (!json).then(create_spinner);
    let result = pipeline
        .run(&base, options, |event| {
            if let Some(spinner) = &spinner {
                spinner.set_message(progress_message(event));
            }
        })
        .await;
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }
    let result = result?;

    if json {
        print_json(&result)
    } else {
        print_suggestions(&base, options, &result);
        Ok(())
    }
}

fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn progress_message(event: &SuggestProgress) -> String {
    match event {
        SuggestProgress::ExactBatch {
            batch,
            batches,
            domains,
        } => format!("Checking exact matches ({} domains, batch {}/{})", domains, batch, batches),
        SuggestProgress::Variation {
            pattern,
            candidate,
            index,
            total,
        } => format!("Checking {} variations: {} ({}/{})", pattern, candidate, index, total),
    }
}

fn print_suggestions(base: &str, options: &SuggestOptions, result: &SuggestionResult) {
    println!("🔍 Domain suggestions for \"{}\"", base);
    println!("═══════════════════════════════════");

    if !options.variations_only {
        let (available, taken): (Vec<&SuggestionRecord>, Vec<&SuggestionRecord>) =
            result.exact.iter().partition(|r| r.available);

        println!();
        println!("🎯 Exact matches:");
        for record in &available {
            println!("   ✅ {}", record_line(record));
        }
        for record in &taken {
            println!("   ❌ {} ({})", record.domain, record.status);
        }
    }

    for (pattern, records) in &result.variations {
        if records.is_empty() {
            continue;
        }
        println!();
        println!("✨ {}:", pattern.label());
        for record in records {
            println!("   ✅ {}", record_line(record));
        }
    }

    println!();
    println!("📈 SUMMARY: {} available domain(s) found", result.available_count());
}

fn record_line(record: &SuggestionRecord) -> String {
    match &record.price {
        Some(price) => format!("{} - {}", record.domain, price),
        None => record.domain.clone(),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<GandiError>() {
        Some(gandi) => {
            eprintln!("{}", gandi.user_message());
            if let Some(body) = gandi.response_body() {
                if let Ok(pretty) = serde_json::to_string_pretty(body) {
                    eprintln!("Response: {}", pretty);
                }
            }
        }
        None => eprintln!("❌ Error: {:#}", error),
    }
}
