//! Arithmetic tool
//!
//! Pure computation, no upstream. Division by zero is reported with a
//! pre-built error envelope rather than through the classifier.

use toolbox::command::{
    CommandRegistry, CommandSpec, FieldKind, FieldSpec, HandlerResult, ValidatedArgs,
};
use toolbox::envelope::{HandlerOutput, ResponseEnvelope};
use toolbox::error::ToolError;

/// Supported arithmetic operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    pub const ALL: [ArithmeticOp; 4] = [
        ArithmeticOp::Add,
        ArithmeticOp::Subtract,
        ArithmeticOp::Multiply,
        ArithmeticOp::Divide,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Subtract => "subtract",
            ArithmeticOp::Multiply => "multiply",
            ArithmeticOp::Divide => "divide",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "×",
            ArithmeticOp::Divide => "÷",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.slug() == slug)
    }

    /// `None` for division by zero
    pub fn apply(self, a: f64, b: f64) -> Option<f64> {
        match self {
            ArithmeticOp::Add => Some(a + b),
            ArithmeticOp::Subtract => Some(a - b),
            ArithmeticOp::Multiply => Some(a * b),
            ArithmeticOp::Divide if b == 0.0 => None,
            ArithmeticOp::Divide => Some(a / b),
        }
    }
}

const OPERATION_SLUGS: &[&str] = &{
    let mut out = [""; ArithmeticOp::ALL.len()];
    let mut i = 0;
    while i < out.len() {
        out[i] = ArithmeticOp::ALL[i].slug();
        i += 1;
    }
    out
};

/// Render like a JS number: integral values without a fractional part,
/// exponent notation outside `[1e-6, 1e21)`, and no negative zero
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let s = format!("{n:e}");
        match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        }
    } else {
        n.to_string()
    }
}

pub fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandSpec::new("calculate", "Perform basic arithmetic operations", calculate)
            .field(
                FieldSpec::required("operation", FieldKind::Enum(OPERATION_SLUGS))
                    .describe("The arithmetic operation to perform"),
            )
            .field(FieldSpec::required("a", FieldKind::Number).describe("First number"))
            .field(FieldSpec::required("b", FieldKind::Number).describe("Second number")),
    );
}

fn calculate(args: &ValidatedArgs) -> HandlerResult {
    let operation = args.str("operation").unwrap_or_default();
    let op = ArithmeticOp::from_slug(operation)
        .ok_or_else(|| ToolError::Other(format!("Unknown operation '{operation}'")))?;
    let a = args.number("a").unwrap_or_default();
    let b = args.number("b").unwrap_or_default();

    let Some(result) = op.apply(a, b) else {
        return Ok(HandlerOutput::Envelope(ResponseEnvelope::error(
            "Error: Division by zero is not allowed.",
        )));
    };

    Ok(format!(
        "{} {} {} = {}",
        format_number(a),
        op.symbol(),
        format_number(b),
        format_number(result)
    )
    .into())
}
