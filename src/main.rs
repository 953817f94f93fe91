use clap::Parser;
use dejapaw::{cli, config, error, fields, records};
use cli::{Cli, Commands, FieldsAction, RecordsAction, WebhookAction};
use config::Store;
use dejapaw_common::Sink;
use error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut store = Store::load(cli.store)?;

    match cli.command {
        Commands::Fields { action } => match action {
            FieldsAction::List => {
                if store.data.fields.is_empty() {
                    println!("項目が設定されていません: `dejapaw fields add` で追加してください");
                } else {
                    println!("{}", fields::render_fields(&store.data.fields));
                    println!("\n* 必須項目");
                }
            }

            FieldsAction::Add { name, field_type, optional, default } => {
                let field = fields::NewField { name, field_type, optional, default }.into_field()?;
                let label = field.label();
                fields::add(&mut store.data, field)?;
                store.save()?;
                println!("✔ 項目を追加しました: {}", label);
            }

            FieldsAction::Remove { index } => {
                let removed = fields::remove(&mut store.data, index)?;
                store.save()?;
                println!("✔ 項目を削除しました: {}", removed.name);
            }

            FieldsAction::Import { file } => {
                let count = fields::import(&mut store.data, &file)?;
                store.save()?;
                println!("✔ {}件の項目を読み込みました: {}", count, file.display());
            }

            FieldsAction::Export { file } => {
                let output = fields::export(&store.data.fields, file.as_deref())?;
                println!("✔ 項目を出力: {}", output.display());
            }
        },

        Commands::Webhook { action } => match action {
            WebhookAction::Show => match store.data.sink() {
                Sink::Local => println!("Webhook: 未設定（ローカル保存）"),
                Sink::Remote { endpoint } => println!("Webhook: {}", endpoint),
            },

            WebhookAction::Set { url } => {
                store.data.webhook = url.trim().to_string();
                store.save()?;
                match store.data.sink() {
                    Sink::Local => println!("✔ Webhookを削除しました（ローカル保存）"),
                    Sink::Remote { endpoint } => println!("✔ Webhookを設定しました: {}", endpoint),
                }
            }

            WebhookAction::Clear => {
                store.data.webhook.clear();
                store.save()?;
                println!("✔ Webhookを削除しました（ローカル保存）");
            }
        },

        Commands::Records { action } => match action {
            RecordsAction::List => {
                println!("{} Records Saved", store.data.records.len());
                if !store.data.records.is_empty() {
                    println!();
                    println!("{}", records::render_table(&store.data.fields, &store.data.records));
                }
            }

            RecordsAction::Delete { index } => {
                store.data.remove_record(index)?;
                store.save()?;
                println!("✔ レコード #{} を削除しました", index);
            }

            RecordsAction::Clear => {
                let count = store.data.records.len();
                store.data.clear_records();
                store.save()?;
                println!("✔ {}件のレコードを削除しました", count);
            }

            RecordsAction::Export { file } => {
                let output = records::export(&store.data, file.as_deref())?;
                println!("✔ {}件のレコードを出力: {}", store.data.records.len(), output.display());
            }
        },
    }

    log::debug!("store: {}", store.path().display());
    Ok(())
}

/// `RUST_LOG` があればそちらを優先
fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
