use clap::{Parser, Subcommand};
use dejapaw_common::FieldType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dejapaw")]
#[command(about = "Dejapaw の項目・Webhook・保存済みレコードを管理", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ストアファイル（デフォルト: ~/.config/dejapaw/store.json）
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 入力項目の管理
    Fields {
        #[command(subcommand)]
        action: FieldsAction,
    },

    /// Webhook（送信先URL）の管理。未設定ならローカル保存
    Webhook {
        #[command(subcommand)]
        action: WebhookAction,
    },

    /// ローカル保存済みレコードの管理
    Records {
        #[command(subcommand)]
        action: RecordsAction,
    },
}

#[derive(Subcommand)]
pub enum FieldsAction {
    /// 項目一覧を表示
    List,

    /// 項目を追加（名前省略時は対話入力）
    Add {
        /// 項目名
        name: Option<String>,

        /// 種別 (string/number/image/clipboard/currency/url)
        #[arg(short = 't', long = "type")]
        field_type: Option<FieldType>,

        /// 必須にしない
        #[arg(long)]
        optional: bool,

        /// 既定値
        #[arg(short, long)]
        default: Option<String>,
    },

    /// 項目を削除
    Remove {
        /// 項目番号（`fields list` の #）
        #[arg(required = true)]
        index: usize,
    },

    /// JSON（項目の配列）から項目リストを置き換え
    Import {
        /// 入力JSONファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 項目リストをJSONで出力
    Export {
        /// 出力ファイル（デフォルト: fields.json）
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum WebhookAction {
    /// 現在の送信先を表示
    Show,

    /// 送信先を設定
    Set {
        #[arg(required = true)]
        url: String,
    },

    /// 送信先を削除（ローカル保存に戻す）
    Clear,
}

#[derive(Subcommand)]
pub enum RecordsAction {
    /// レコードを表形式で表示
    List,

    /// レコードを削除
    Delete {
        /// レコード番号（`records list` の #）
        #[arg(required = true)]
        index: usize,
    },

    /// すべてのレコードを削除
    Clear,

    /// レコードをJSONで出力
    Export {
        /// 出力ファイル（デフォルト: records-YYYYMMDD.json）
        file: Option<PathBuf>,
    },
}
