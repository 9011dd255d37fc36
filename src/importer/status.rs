// ==========================================
// 运输任务数据 - 导入状态
// ==========================================
// 用途: 面向界面的状态提示（文本经 i18n 本地化）
// ==========================================

use crate::domain::import_outcome::ImportSummary;
use crate::i18n::{t_in, t_with_args_in};

/// 导入状态
#[derive(Debug, Clone, PartialEq)]
pub enum ImportStatus {
    /// 正在读取工作簿
    Loading,
    /// 加载成功
    Loaded { import_id: String },
    /// 加载失败（reason 为错误描述）
    Failed { reason: String },
}

/// 状态色调（对应界面上的颜色提示）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Error,
}

impl ImportStatus {
    pub fn tone(&self) -> StatusTone {
        match self {
            ImportStatus::Loading => StatusTone::Info,
            ImportStatus::Loaded { .. } => StatusTone::Success,
            ImportStatus::Failed { .. } => StatusTone::Error,
        }
    }

    /// 按指定语言生成状态文本
    pub fn message_in(&self, locale: &str) -> String {
        match self {
            ImportStatus::Loading => t_in(locale, "import.status.loading"),
            ImportStatus::Loaded { .. } => t_in(locale, "import.status.loaded"),
            ImportStatus::Failed { reason } => {
                t_with_args_in(locale, "import.status.failed", &[("reason", reason)])
            }
        }
    }
}

/// 导入汇总文本
pub fn summary_message(locale: &str, summary: &ImportSummary) -> String {
    let counts = [
        ("products", summary.products.to_string()),
        ("warehouses", summary.warehouses.to_string()),
        ("inventory", summary.inventory_items.to_string()),
        ("destinations", summary.destinations.to_string()),
        ("transports", summary.transports.to_string()),
    ];
    let args: Vec<(&str, &str)> = counts.iter().map(|(k, v)| (*k, v.as_str())).collect();
    t_with_args_in(locale, "import.summary", &args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tone() {
        assert_eq!(ImportStatus::Loading.tone(), StatusTone::Info);
        assert_eq!(
            ImportStatus::Loaded {
                import_id: "x".to_string()
            }
            .tone(),
            StatusTone::Success
        );
        assert_eq!(
            ImportStatus::Failed {
                reason: "x".to_string()
            }
            .tone(),
            StatusTone::Error
        );
    }

    #[test]
    fn test_status_messages_per_locale() {
        assert_eq!(
            ImportStatus::Loading.message_in("ru"),
            "Загрузка данных из Excel..."
        );
        assert_eq!(
            ImportStatus::Loaded {
                import_id: "x".to_string()
            }
            .message_in("ru"),
            "Данные успешно загружены из Excel"
        );

        let status = ImportStatus::Failed {
            reason: "缺少必需工作表: ТС".to_string(),
        };
        assert_eq!(
            status.message_in("ru"),
            "Ошибка загрузки Excel: 缺少必需工作表: ТС"
        );
        assert!(status.message_in("zh-CN").contains("ТС"));
    }

    #[test]
    fn test_summary_message() {
        let summary = ImportSummary {
            products: 3,
            warehouses: 2,
            inventory_items: 5,
            destinations: 1,
            transports: 4,
        };
        assert_eq!(
            summary_message("en", &summary),
            "3 products, 2 warehouses, 5 inventory records, 1 destinations, 4 transports"
        );
    }
}
