//! Human-readable rendering of a planner result.

use foreman_domain::PlannerResult;

/// Renders the result as a terminal-friendly summary.
pub fn render_text(result: &PlannerResult) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Session {} — {}", result.id, result.status));
    lines.push(format!("  input: {}", result.input));

    if let Some(complexity) = &result.complexity {
        let factors: Vec<&str> = complexity.factors.iter().map(|f| f.as_str()).collect();
        lines.push(format!(
            "  complexity: {} (score {}{})",
            complexity.level,
            complexity.score,
            if factors.is_empty() {
                String::new()
            } else {
                format!("; {}", factors.join(", "))
            }
        ));
    }

    if let Some(plan) = &result.plan {
        lines.push(format!(
            "  plan: {} — {} step(s), est. {}ms",
            plan.strategy,
            plan.steps.len(),
            plan.estimated_duration_ms
        ));
        if !plan.risks.is_empty() {
            let risks: Vec<&str> = plan.risks.iter().map(|r| r.as_str()).collect();
            lines.push(format!("  risks: {}", risks.join(", ")));
        }
    }

    if result.actions.is_empty() {
        lines.push("  actions: none".to_string());
    } else {
        lines.push("  actions:".to_string());
        for (index, action) in result.actions.iter().enumerate() {
            let parameters: Vec<String> = action
                .parameters
                .iter()
                .map(|p| p.to_string())
                .collect();
            lines.push(format!(
                "    {}. {} {}/{} [{}] (priority {})",
                index + 1,
                action.action_type,
                action.tool,
                action.method,
                parameters.join(", "),
                action.priority
            ));
        }
    }

    for reflection in &result.reflections {
        lines.push(format!(
            "  reflection: {} (confidence {:.2})",
            reflection.assessment, reflection.confidence
        ));
        for observation in &reflection.observations {
            lines.push(format!("    - {}", observation));
        }
    }

    if !result.errors.is_empty() {
        lines.push(format!("  rejected: {} action(s)", result.errors.len()));
        for failure in &result.errors {
            lines.push(format!(
                "    - {}: {}",
                failure.action_type,
                failure.messages.join("; ")
            ));
        }
    }

    lines.push(format!(
        "  confidence {:.2} | ~{} tokens | {} iteration(s) | {}ms",
        result.confidence, result.tokens_used, result.iterations, result.duration_ms
    ));

    lines.join("\n")
}
