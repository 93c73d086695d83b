use crate::domain::ShowWhen;

use super::{field::FieldState, path::FieldPath};

/// Show/hide wiring from a target field to a dependent sibling.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityRule {
    pub dependent: FieldPath,
    pub target: FieldPath,
    pub show_when: ShowWhen,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormNode {
    Field(FieldState),
    Group(SectionState),
}

/// A container of rendered fields: the form root or an object field's group.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionState {
    pub path: FieldPath,
    pub legend: String,
    pub nodes: Vec<FormNode>,
    pub rules: Vec<VisibilityRule>,
}

impl SectionState {
    pub fn root(legend: impl Into<String>) -> Self {
        Self::group(FieldPath::root(), legend)
    }

    pub fn group(path: FieldPath, legend: impl Into<String>) -> Self {
        Self {
            path,
            legend: legend.into(),
            nodes: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct child field of this container.
    pub fn sibling(&self, name: &str) -> Option<&FieldState> {
        self.nodes.iter().find_map(|node| match node {
            FormNode::Field(field) if field.name() == name => Some(field),
            _ => None,
        })
    }

    pub fn field(&self, path: &FieldPath) -> Option<&FieldState> {
        self.nodes.iter().find_map(|node| match node {
            FormNode::Field(field) if field.path == *path => Some(field),
            FormNode::Group(group) if path.segments().starts_with(group.path.segments()) => {
                group.field(path)
            }
            _ => None,
        })
    }

    pub fn field_mut(&mut self, path: &FieldPath) -> Option<&mut FieldState> {
        self.nodes.iter_mut().find_map(|node| match node {
            FormNode::Field(field) if field.path == *path => Some(field),
            FormNode::Group(group) if path.segments().starts_with(group.path.segments()) => {
                group.field_mut(path)
            }
            _ => None,
        })
    }

    /// Every field below this container, depth first in declared order.
    pub fn fields(&self) -> Vec<&FieldState> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a FieldState>) {
        for node in &self.nodes {
            match node {
                FormNode::Field(field) => out.push(field),
                FormNode::Group(group) => group.collect_fields(out),
            }
        }
    }

    pub(crate) fn for_each_field_mut(&mut self, visit: &mut impl FnMut(&mut FieldState)) {
        for node in &mut self.nodes {
            match node {
                FormNode::Field(field) => visit(field),
                FormNode::Group(group) => group.for_each_field_mut(visit),
            }
        }
    }

    pub fn groups(&self) -> Vec<&SectionState> {
        let mut out = Vec::new();
        for node in &self.nodes {
            if let FormNode::Group(group) = node {
                out.push(group);
                out.extend(group.groups());
            }
        }
        out
    }

    pub(crate) fn collect_rules(&self, out: &mut Vec<VisibilityRule>) {
        out.extend(self.rules.iter().cloned());
        for node in &self.nodes {
            if let FormNode::Group(group) = node {
                group.collect_rules(out);
            }
        }
    }
}
