//! SQL condition tree and its rendering
//!
//! Joins are n-ary: a left fold `(a AND b) AND c` is stored as one `And`
//! holding `[a, b, c]`, so a composite with many children stays one level
//! deep. Walks over the tree use an explicit stack.

use qcond_filter::ConditionBackend;
use qcond_operators::{CompareOp, Comparison};
use qcond_shared::Value;

use crate::dialect::SqlDialect;

/// Inspectable SQL condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlCondition {
    /// One primitive comparison
    Compare(Comparison),
    /// Every operand must hold; operands fold left
    And(Vec<SqlCondition>),
    /// Any operand must hold; operands fold left
    Or(Vec<SqlCondition>),
}

impl SqlCondition {
    /// Comparisons in left-to-right order
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(condition) = stack.pop() {
            match condition {
                SqlCondition::Compare(comparison) => out.push(comparison),
                SqlCondition::And(operands) | SqlCondition::Or(operands) => {
                    stack.extend(operands.iter().rev());
                }
            }
        }
        out
    }

    /// Nesting depth of joins; a single comparison has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((condition, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let SqlCondition::And(operands) | SqlCondition::Or(operands) = condition {
                stack.extend(operands.iter().map(|operand| (operand, level + 1)));
            }
        }
        deepest
    }

    /// Operands of a join, empty for a comparison
    pub fn operands(&self) -> &[SqlCondition] {
        match self {
            SqlCondition::Compare(_) => &[],
            SqlCondition::And(operands) | SqlCondition::Or(operands) => operands,
        }
    }

    /// `AND` or `OR` for joins
    pub fn joiner(&self) -> Option<&'static str> {
        match self {
            SqlCondition::Compare(_) => None,
            SqlCondition::And(_) => Some("AND"),
            SqlCondition::Or(_) => Some("OR"),
        }
    }
}

enum RenderStep<'a> {
    Visit(&'a SqlCondition),
    Join(&'static str, usize),
}

/// Condition backend producing inline SQL for one dialect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SqlBackend {
    dialect: SqlDialect,
}

impl SqlBackend {
    /// Create a backend for `dialect`
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    /// The dialect this backend renders
    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Render a full `SELECT` over `table` filtered by `condition`
    pub fn render_select(&self, table: &str, condition: &SqlCondition) -> String {
        format!(
            "SELECT * FROM {} WHERE {}",
            self.dialect.quote_ident(table),
            self.render_condition(condition)
        )
    }

    /// Render a condition as a SQL boolean expression
    ///
    /// Every operand of a join is parenthesised, and operands fold left:
    /// `[a, b, c]` under AND renders as `((a) AND (b)) AND (c)`.
    pub fn render_condition(&self, condition: &SqlCondition) -> String {
        let mut rendered: Vec<String> = Vec::new();
        let mut steps = vec![RenderStep::Visit(condition)];
        while let Some(step) = steps.pop() {
            match step {
                RenderStep::Visit(SqlCondition::Compare(comparison)) => {
                    rendered.push(self.render_comparison(comparison));
                }
                RenderStep::Visit(join) => {
                    let operands = join.operands();
                    steps.push(RenderStep::Join(join.joiner().unwrap_or("AND"), operands.len()));
                    steps.extend(operands.iter().rev().map(RenderStep::Visit));
                }
                RenderStep::Join(joiner, count) => {
                    let start = rendered.len().saturating_sub(count);
                    let operands = rendered.split_off(start);
                    rendered.push(fold_left(joiner, &operands));
                }
            }
        }
        rendered.pop().unwrap_or_default()
    }

    /// Render a value as an inline SQL literal
    pub fn literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => self.dialect.bool_literal(*b).to_string(),
            Value::String(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Date(_) => self.dialect.date_literal(&value.to_string()),
            Value::Numeric(d) => d.normalize().to_string(),
        }
    }

    fn render_comparison(&self, comparison: &Comparison) -> String {
        let column = self.dialect.quote_ident(&comparison.column);
        let value = &comparison.value;
        let literal = || self.literal(value);

        match comparison.op {
            CompareOp::Eq if value.is_null() => format!("{column} IS NULL"),
            CompareOp::Ne if value.is_null() => format!("{column} IS NOT NULL"),
            CompareOp::Eq => format!("{column} = {}", literal()),
            CompareOp::Ne => format!("{column} <> {}", literal()),
            CompareOp::Gt => format!("{column} > {}", literal()),
            CompareOp::Ge => format!("{column} >= {}", literal()),
            CompareOp::Lt => format!("{column} < {}", literal()),
            CompareOp::Le => format!("{column} <= {}", literal()),
            CompareOp::Like => format!("{column} LIKE {}", literal()),
            CompareOp::IsNull => format!("{column} IS NULL"),
            CompareOp::IsNotNull => format!("{column} IS NOT NULL"),
            CompareOp::DayEq => format!("{} = {}", self.dialect.day_of_month(&column), literal()),
            CompareOp::MonthEq => format!("{} = {}", self.dialect.month(&column), literal()),
            CompareOp::YearEq => format!("{} = {}", self.dialect.year(&column), literal()),
            CompareOp::DayOfWeekEq => {
                format!("{} = {}", self.dialect.iso_day_of_week(&column), literal())
            }
            CompareOp::DateEq => format!("CAST({column} AS DATE) = {}", literal()),
        }
    }
}

impl ConditionBackend for SqlBackend {
    type Condition = SqlCondition;
    type Rendered = String;

    fn compare(&self, comparison: Comparison) -> SqlCondition {
        log::trace!("sql comparison: {comparison}");
        SqlCondition::Compare(comparison)
    }

    fn and(&self, left: SqlCondition, right: SqlCondition) -> SqlCondition {
        match left {
            SqlCondition::And(mut operands) => {
                operands.push(right);
                SqlCondition::And(operands)
            }
            left => SqlCondition::And(vec![left, right]),
        }
    }

    fn or(&self, left: SqlCondition, right: SqlCondition) -> SqlCondition {
        match left {
            SqlCondition::Or(mut operands) => {
                operands.push(right);
                SqlCondition::Or(operands)
            }
            left => SqlCondition::Or(vec![left, right]),
        }
    }

    fn render(&self, condition: &SqlCondition) -> String {
        self.render_condition(condition)
    }
}

fn fold_left(joiner: &str, operands: &[String]) -> String {
    let Some((first, rest)) = operands.split_first() else {
        return String::new();
    };
    if rest.is_empty() {
        return first.clone();
    }
    let mut out = "(".repeat(rest.len());
    out.push_str(first);
    out.push(')');
    for (i, operand) in rest.iter().enumerate() {
        out.push(' ');
        out.push_str(joiner);
        out.push_str(" (");
        out.push_str(operand);
        out.push(')');
        if i + 1 < rest.len() {
            out.push(')');
        }
    }
    out
}
