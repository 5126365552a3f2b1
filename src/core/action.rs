//! 操作类型与表示形式选择

/// 资源上的操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Delete,
}

/// 输出表示形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// 关联对象只给出 id
    Flat,
    /// 关联对象内嵌完整表示
    Expanded,
}

impl Action {
    /// 读操作返回展开形式，写操作返回扁平形式
    pub fn representation(self) -> Representation {
        match self {
            Action::List | Action::Retrieve => Representation::Expanded,
            Action::Create | Action::Update | Action::PartialUpdate | Action::Delete => {
                Representation::Flat
            }
        }
    }

    /// 部分更新时不检查必填字段
    pub fn is_partial(self) -> bool {
        self == Action::PartialUpdate
    }
}
