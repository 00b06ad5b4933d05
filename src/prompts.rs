use crate::schemas::study_guide::StudyGuideRequest;

/// Context shared by every step of a guide.
pub fn system_prompt(req: &StudyGuideRequest) -> String {
    format!(
        "You are creating a personalized study guide for a student with the following context:
- Subject: {subject}
- Current Level: {level}
- Available Time: {time} hours/week
- Learning Style: {style}
- Learning Goal: {goal}

Please respond to all requests in a Markdown format. Include links to relevant resources for each step.
Maintain this context for all responses and ensure each step builds upon previous steps.",
        subject = req.subject,
        level = req.current_level,
        time = req.time_available,
        style = req.learning_style,
        goal = req.goal,
    )
}

/// Guidance for one phase of the guide: 0 intro, 1 intermediate,
/// 2 advanced, 3 summary. Anything else gets a generic continuation.
pub fn step_prompt(step: u32, req: &StudyGuideRequest) -> String {
    let subject = &req.subject;
    let level = &req.current_level;
    let time = &req.time_available;
    let style = &req.learning_style;
    let goal = &req.goal;

    match step {
        0 => format!(
            "Create the first part of a study guide for {subject}, aimed at a {level} learner. Include:
1. A clear introduction to the subject
2. Key foundational concepts that must be understood
3. Common misconceptions to avoid
4. Initial learning objectives that lead towards: {goal}"
        ),
        1 => format!(
            "Building on the previous content about {subject}, outline:
1. Intermediate concepts
2. Practical exercises suited to a {style} learner
3. Study techniques that fit into {time} hours/week
4. Progress tracking methods"
        ),
        2 => format!(
            "For the advanced section of the {subject} guide, provide:
1. Complex topics and their relationships
2. Real-world applications
3. Advanced resources for a {style} learner
4. Mastery indicators for the goal: {goal}"
        ),
        3 => format!(
            "Create a summary section for {subject} with:
1. Review of key points
2. Common pitfalls to avoid for a {level} learner
3. Next steps for further learning towards: {goal}
4. Self-assessment questions"
        ),
        _ => format!(
            "Continue the study guide for {subject}, building upon previous content. \
Keep it suited to a {style} learner at {level} level with {time} hours/week available."
        ),
    }
}

pub fn component_prompt(component: &str, subject: &str) -> String {
    format!(
        "Descriptively explain the following component of {subject} in detail: {component}
Include:
1. Definition and core concepts
2. Importance and applications
3. Common challenges and solutions
4. Learning resources and tips"
    )
}

pub fn component_persona(subject: &str) -> String {
    format!("You are a fun loving, world-class expert, professor, and educator in {subject}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn algebra() -> StudyGuideRequest {
        StudyGuideRequest {
            subject: "Algebra".into(),
            current_level: "Beginner".into(),
            time_available: "5".into(),
            learning_style: "Visual".into(),
            goal: "Pass exam".into(),
            step: 0,
            previous_responses: vec![],
        }
    }

    #[test]
    fn system_prompt_embeds_student_context() {
        let prompt = system_prompt(&algebra());
        assert!(prompt.contains("- Subject: Algebra"));
        assert!(prompt.contains("- Current Level: Beginner"));
        assert!(prompt.contains("- Available Time: 5 hours/week"));
        assert!(prompt.contains("- Learning Style: Visual"));
        assert!(prompt.contains("- Learning Goal: Pass exam"));
        assert!(prompt.contains("Markdown"));
    }

    #[test]
    fn every_phase_template_names_the_subject() {
        let req = algebra();
        for step in 0..=3 {
            let prompt = step_prompt(step, &req);
            assert!(prompt.contains("Algebra"), "step {step}: {prompt}");
        }
    }

    #[test]
    fn phase_templates_are_distinct() {
        let req = algebra();
        assert!(step_prompt(0, &req).contains("introduction"));
        assert!(step_prompt(1, &req).contains("Intermediate concepts"));
        assert!(step_prompt(2, &req).contains("advanced section"));
        assert!(step_prompt(3, &req).contains("summary section"));
    }

    #[test]
    fn out_of_range_step_falls_back_to_continuation() {
        let prompt = step_prompt(99, &algebra());
        assert!(prompt.starts_with("Continue the study guide for Algebra"));
        assert!(prompt.contains("Visual"));
        assert!(prompt.contains("Beginner"));
        assert!(prompt.contains("5 hours/week"));
    }

    #[test]
    fn blank_request_still_renders() {
        let prompt = step_prompt(0, &StudyGuideRequest::default());
        assert!(prompt.starts_with("Create the first part of a study guide for ,"));
    }

    #[test]
    fn component_prompts_name_component_and_subject() {
        let prompt = component_prompt("Quadratic equations", "Algebra");
        assert!(prompt.contains("component of Algebra in detail: Quadratic equations"));
        assert!(component_persona("Algebra").ends_with("educator in Algebra"));
    }
}
