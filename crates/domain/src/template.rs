use chrono::Duration;
use derive_more::Deref;
use log::debug;
use uuid::Uuid;

use crate::Name;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutTemplate {
    pub id: TemplateID,
    pub name: Name,
    pub exercises: Vec<String>,
    pub estimated_duration: Duration,
}

impl WorkoutTemplate {
    #[must_use]
    pub fn new(name: Name, exercises: Vec<String>, estimated_duration: Duration) -> Self {
        Self {
            id: TemplateID::random(),
            name,
            exercises,
            estimated_duration,
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateID(Uuid);

impl TemplateID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for TemplateID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for TemplateID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// User-editable templates, matched by id since names may repeat.
#[derive(Debug, Default, Clone)]
pub struct TemplateLibrary {
    templates: Vec<WorkoutTemplate>,
}

impl TemplateLibrary {
    #[must_use]
    pub fn new(templates: Vec<WorkoutTemplate>) -> Self {
        Self { templates }
    }

    #[must_use]
    pub fn templates(&self) -> &[WorkoutTemplate] {
        &self.templates
    }

    #[must_use]
    pub fn get(&self, id: TemplateID) -> Option<&WorkoutTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, template: WorkoutTemplate) -> TemplateID {
        let id = template.id;
        self.templates.push(template);
        id
    }

    /// Returns `false` if no template with the same id exists.
    pub fn replace(&mut self, template: WorkoutTemplate) -> bool {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => {
                *existing = template;
                true
            }
            None => {
                debug!("no template with id {} to replace", *template.id);
                false
            }
        }
    }

    pub fn delete(&mut self, id: TemplateID) -> Option<WorkoutTemplate> {
        let index = self.templates.iter().position(|t| t.id == id)?;
        Some(self.templates.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn template(id: u128, name: &str) -> WorkoutTemplate {
        WorkoutTemplate {
            id: id.into(),
            name: Name::new(name).unwrap(),
            exercises: vec!["Squat".to_string()],
            estimated_duration: Duration::minutes(45),
        }
    }

    #[test]
    fn test_template_library_replace_matches_by_id() {
        let mut library = TemplateLibrary::new(vec![template(1, "Legs"), template(2, "Legs")]);
        let mut edited = template(2, "Legs");
        edited.exercises.push("Lunges".to_string());

        assert!(library.replace(edited.clone()));
        assert_eq!(library.get(1.into()), Some(&template(1, "Legs")));
        assert_eq!(library.get(2.into()), Some(&edited));
        assert!(!library.replace(template(3, "Legs")));
    }

    #[test]
    fn test_template_library_add_delete() {
        let mut library = TemplateLibrary::default();
        let id = library.add(template(7, "Full Body"));
        assert_eq!(id, 7.into());
        assert_eq!(library.templates().len(), 1);
        assert_eq!(library.delete(id), Some(template(7, "Full Body")));
        assert_eq!(library.delete(id), None);
        assert!(library.templates().is_empty());
    }

    #[test]
    fn test_template_id_random() {
        assert!(!TemplateID::random().is_nil());
        assert!(TemplateID::nil().is_nil());
    }
}
