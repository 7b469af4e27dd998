//! Test modules for the expression evaluator
