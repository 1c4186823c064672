mod commands;
mod kind;

use clap::{Parser, Subcommand};
use colored::Colorize;
use dirtcloud_client::{Client, InstanceStatus};
use dirtcloud_config::ProviderConfig;
use kind::ResourceKind;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "dirt")]
#[command(about = "DirtCloud のリソースを参照・インポート・削除する", long_about = None)]
#[command(version)]
struct Cli {
    /// API エンドポイント (デフォルト: http://localhost:8080/v1)
    #[arg(long, global = true, env = "DIRT_ENDPOINT")]
    endpoint: Option<String>,

    /// Bearer トークン
    #[arg(long, global = true, env = "DIRT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// リクエストごとのタイムアウト秒数 (上限 30 秒)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// デバッグログを有効化
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 既存リソースを ID からインポート (オブジェクトは bucket_id/object_id)
    Import {
        kind: ResourceKind,
        id: String,
    },
    /// リソースの現在の状態を取得
    Refresh {
        kind: ResourceKind,
        id: String,
    },
    /// リソースを削除 (存在しない場合も成功)
    Destroy {
        kind: ResourceKind,
        id: String,
        /// オブジェクトが残っているバケットは削除しない
        #[arg(long)]
        keep_nonempty: bool,
    },
    /// パスが完全一致するメタデータを取得
    MetadataByPath {
        path: String,
    },
    /// プロジェクト一覧
    Projects {
        /// 名前で絞り込み
        #[arg(long)]
        name: Option<String>,
    },
    /// インスタンス一覧
    Instances {
        #[arg(long)]
        project_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// running | stopped
        #[arg(long)]
        status: Option<InstanceStatus>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout は JSON 出力専用なのでログは stderr へ
    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();

    let config = ProviderConfig::resolve(
        cli.endpoint.filter(|e| !e.is_empty()),
        cli.token.filter(|t| !t.is_empty()),
    )?;
    tracing::debug!("config: {:?}", config);

    let mut client = Client::new(&config)?;
    if let Some(secs) = cli.timeout {
        client = client.with_deadline(Duration::from_secs(secs));
    }

    let result = match cli.command {
        Commands::Import { kind, id } => commands::import::handle(client, kind, &id).await,
        Commands::Refresh { kind, id } => commands::refresh::handle(client, kind, &id).await,
        Commands::Destroy {
            kind,
            id,
            keep_nonempty,
        } => commands::destroy::handle(client, kind, &id, keep_nonempty).await,
        Commands::MetadataByPath { path } => commands::lookup::metadata(client, &path).await,
        Commands::Projects { name } => commands::lookup::projects(client, name.as_deref()).await,
        Commands::Instances {
            project_id,
            name,
            status,
        } => commands::lookup::instances(client, project_id, name, status).await,
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}
