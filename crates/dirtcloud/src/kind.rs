use clap::ValueEnum;
use std::fmt;

/// CLI から指定できるリソース種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Project,
    Instance,
    Metadata,
    Bucket,
    Object,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Project => write!(f, "project"),
            ResourceKind::Instance => write!(f, "instance"),
            ResourceKind::Metadata => write!(f, "metadata"),
            ResourceKind::Bucket => write!(f, "bucket"),
            ResourceKind::Object => write!(f, "object"),
        }
    }
}
