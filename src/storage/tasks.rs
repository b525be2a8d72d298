//! 任务数据存储
//! 管理 {data_dir}/tasks.toml 中的任务列表，是任务集合唯一的权威副本

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{load_toml, save_toml};
use crate::error::{Result, TaskError};

/// 任务文件名
pub const TASKS_FILE: &str = "tasks.toml";

/// 任务数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// 任务 ID（单调递增，创建后不变，删除后不复用）
    pub id: u64,
    /// 任务名称
    pub name: String,
    /// 截止日期（按天使用，时间部分仅保存）
    pub due_date: DateTime<Utc>,
    /// 是否已完成
    #[serde(default)]
    pub is_completed: bool,
}

/// tasks.toml 文件结构（读取）
#[derive(Debug, Default, Deserialize)]
struct TasksFile {
    #[serde(default)]
    next_id: Option<u64>,
    #[serde(default)]
    tasks: Vec<Task>,
}

/// tasks.toml 文件结构（写入，避免复制任务列表）
#[derive(Serialize)]
struct TasksFileRef<'a> {
    next_id: u64,
    tasks: &'a [Task],
}

/// 任务存储
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    /// 打开指定路径的任务文件，文件不存在时得到空列表
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self {
            path: path.into(),
            tasks: Vec::new(),
            next_id: 0,
        };
        store.load_all()?;

        info!(
            path = %store.path.display(),
            tasks = store.tasks.len(),
            next_id = store.next_id,
            "opened task store"
        );

        Ok(store)
    }

    /// 打开数据目录下的 tasks.toml
    pub fn open_in(data_dir: &Path) -> Result<Self> {
        Self::open(data_dir.join(TASKS_FILE))
    }

    /// 从磁盘重新读取全部任务（插入顺序），替换内存中的列表
    ///
    /// 计数器只会前进，不会因为磁盘上的旧值而回退。读取失败时内存不变。
    pub fn load_all(&mut self) -> Result<&[Task]> {
        let file = read_tasks_file(&self.path)?;
        let persisted = file.next_id.unwrap_or(0).max(self.next_id);
        self.next_id = restore_next_id(Some(persisted), &file.tasks);
        self.tasks = file.tasks;
        Ok(&self.tasks)
    }

    /// 原子性地用 `tasks` 替换磁盘上的内容
    ///
    /// 含重复 ID 的列表会被拒绝，磁盘上不会出现无法再打开的文件。
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        check_unique_ids(tasks, &self.path)?;
        let next_id = restore_next_id(Some(self.next_id), tasks);
        let file = TasksFileRef { next_id, tasks };

        save_toml(&self.path, &file).map_err(|e| {
            TaskError::storage(format!("failed to write {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), tasks = tasks.len(), "saved tasks");
        Ok(())
    }

    /// 分配下一个 ID 并推进计数器
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// 当前内存中的任务列表
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 可变访问仅对 operations 层开放
    pub(crate) fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    /// 持久化当前内存状态
    pub(crate) fn commit(&self) -> Result<()> {
        self.save(&self.tasks)
    }
}

/// 读取并校验 tasks.toml；首次运行（文件不存在）不是错误
fn read_tasks_file(path: &Path) -> Result<TasksFile> {
    if !path.exists() {
        return Ok(TasksFile::default());
    }

    let file: TasksFile = load_toml(path)
        .map_err(|e| TaskError::storage(format!("failed to read {}: {}", path.display(), e)))?;
    check_unique_ids(&file.tasks, path)?;

    Ok(file)
}

fn check_unique_ids(tasks: &[Task], path: &Path) -> Result<()> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(task.id) {
            return Err(TaskError::storage(format!(
                "{} contains duplicate task id {}",
                path.display(),
                task.id
            )));
        }
    }
    Ok(())
}

/// 计数器至少为 max(id) + 1，且不小于已持久化的值
fn restore_next_id(persisted: Option<u64>, tasks: &[Task]) -> u64 {
    let from_tasks = tasks.iter().map(|t| t.id + 1).max().unwrap_or(0);
    persisted.unwrap_or(0).max(from_tasks)
}
