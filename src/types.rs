// src/types.rs
use std::path::PathBuf;

// 界面发给控制器的命令
#[derive(Clone, Debug, PartialEq)]
pub enum ControlCommand {
    Start,
    Stop,
    // 从磁盘读取 CSV
    LoadCsv(PathBuf),
    // 拖放进来的文件内容 (无路径)
    LoadText(String),
    SaveCsv(PathBuf),
    // 导出三张 PNG 到目录
    ExportPng(PathBuf),
}
