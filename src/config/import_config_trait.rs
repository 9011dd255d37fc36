// ==========================================
// 运输任务数据 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入管道所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入
// ==========================================

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入管道在运行时读取的开关
// 实现者: ImporterConfig
pub trait ImportConfigReader: Send + Sync {
    /// 界面语言（状态提示文本使用）
    ///
    /// # 默认值
    /// - "zh-CN"
    fn locale(&self) -> &str;

    /// 生成视图后是否执行规划校验
    ///
    /// # 默认值
    /// - false
    fn validate_plan(&self) -> bool;
}
