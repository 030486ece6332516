use crate::ElementKind;

/// Ошибки построения аннотаций
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotateError {
    /// Выделен элемент не того вида
    InvalidElementKind {
        element: String,
        expected: ElementKind,
    },
    /// Усреднение по пустому набору точек
    EmptyElementSet,
    /// Ссылка больше не разрешается в геометрию
    StaleReference(String),
    /// Новое имя совпадает с именем объекта сцены
    NameCollision(String),
    /// Пустое или недопустимое имя
    InvalidName(String),
}

impl AnnotateError {
    /// Ошибка касается только текущего элемента и проход можно продолжить
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            AnnotateError::EmptyElementSet | AnnotateError::StaleReference(_)
        )
    }
}

impl std::fmt::Display for AnnotateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotateError::InvalidElementKind { element, expected } => write!(
                f,
                "'{}' is not a {}",
                element,
                expected.display_name()
            ),
            AnnotateError::EmptyElementSet => write!(f, "No points to average"),
            AnnotateError::StaleReference(element) => {
                write!(f, "'{}' no longer exists", element)
            }
            AnnotateError::NameCollision(name) => {
                write!(f, "Name '{}' is already taken by a mesh", name)
            }
            AnnotateError::InvalidName(name) => write!(f, "Invalid name '{}'", name),
        }
    }
}

impl std::error::Error for AnnotateError {}
