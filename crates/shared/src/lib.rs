use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

mod errors;

pub use errors::AnnotateError;

/// Уникальный идентификатор объекта в сцене
pub type ObjectId = String;

/// Имя узла аннотации в сцене хоста
pub type AnnotationName = String;

/// Гранулярность элемента геометрии
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Object,
    Vertex,
    Edge,
    Face,
    VertexFace,
}

impl ElementKind {
    /// Человекочитаемое имя для подсказок ("Please select: vertex")
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Object => "object",
            ElementKind::Vertex => "vertex",
            ElementKind::Edge => "edge",
            ElementKind::Face => "face",
            ElementKind::VertexFace => "vertex face",
        }
    }
}

/// Ссылка на элемент геометрии: объект целиком или один компонент
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementRef {
    Object {
        object: ObjectId,
    },
    Vertex {
        object: ObjectId,
        index: usize,
    },
    Edge {
        object: ObjectId,
        index: usize,
    },
    Face {
        object: ObjectId,
        index: usize,
    },
    /// Вершина, рассматриваемая со стороны конкретной грани
    VertexFace {
        object: ObjectId,
        vertex: usize,
        face: usize,
    },
}

impl ElementRef {
    pub fn object(name: &str) -> Self {
        ElementRef::Object {
            object: name.to_string(),
        }
    }

    pub fn vertex(object: &str, index: usize) -> Self {
        ElementRef::Vertex {
            object: object.to_string(),
            index,
        }
    }

    pub fn edge(object: &str, index: usize) -> Self {
        ElementRef::Edge {
            object: object.to_string(),
            index,
        }
    }

    pub fn face(object: &str, index: usize) -> Self {
        ElementRef::Face {
            object: object.to_string(),
            index,
        }
    }

    pub fn vertex_face(object: &str, vertex: usize, face: usize) -> Self {
        ElementRef::VertexFace {
            object: object.to_string(),
            vertex,
            face,
        }
    }

    /// Компонент объекта заданного вида с индексом.
    /// Для `Object` и `VertexFace` индекс не определён: возвращает `None`.
    pub fn component(object: &str, kind: ElementKind, index: usize) -> Option<Self> {
        match kind {
            ElementKind::Vertex => Some(Self::vertex(object, index)),
            ElementKind::Edge => Some(Self::edge(object, index)),
            ElementKind::Face => Some(Self::face(object, index)),
            ElementKind::Object | ElementKind::VertexFace => None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Object { .. } => ElementKind::Object,
            ElementRef::Vertex { .. } => ElementKind::Vertex,
            ElementRef::Edge { .. } => ElementKind::Edge,
            ElementRef::Face { .. } => ElementKind::Face,
            ElementRef::VertexFace { .. } => ElementKind::VertexFace,
        }
    }

    /// Имя объекта-владельца
    pub fn object_name(&self) -> &str {
        match self {
            ElementRef::Object { object }
            | ElementRef::Vertex { object, .. }
            | ElementRef::Edge { object, .. }
            | ElementRef::Face { object, .. }
            | ElementRef::VertexFace { object, .. } => object,
        }
    }

    /// Ссылка на весь объект-владелец
    pub fn owner_object(&self) -> ElementRef {
        ElementRef::object(self.object_name())
    }

    /// Вершина, к которой привязан vertex-face
    pub fn anchor_vertex(&self) -> Option<ElementRef> {
        match self {
            ElementRef::VertexFace { object, vertex, .. } => Some(Self::vertex(object, *vertex)),
            ElementRef::Vertex { .. } => Some(self.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRef::Object { object } => write!(f, "{object}"),
            ElementRef::Vertex { object, index } => write!(f, "{object}.vtx[{index}]"),
            ElementRef::Edge { object, index } => write!(f, "{object}.e[{index}]"),
            ElementRef::Face { object, index } => write!(f, "{object}.f[{index}]"),
            ElementRef::VertexFace {
                object,
                vertex,
                face,
            } => write!(f, "{object}.vtxFace[{vertex}][{face}]"),
        }
    }
}

/// Вид производной величины, вычисляемой для элемента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    RawPosition,
    EdgeMidpoint,
    FaceCentroid,
    VertexNormal,
}

impl SampleKind {
    /// Какой элемент нужно выделить, чтобы эта величина была определена
    pub fn required_kind(&self) -> ElementKind {
        match self {
            SampleKind::RawPosition => ElementKind::Vertex,
            SampleKind::EdgeMidpoint => ElementKind::Edge,
            SampleKind::FaceCentroid => ElementKind::Face,
            SampleKind::VertexNormal => ElementKind::VertexFace,
        }
    }
}

/// Точность отображения: число знаков после запятой, 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Precision(u8);

impl Precision {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const DEFAULT: u8 = 2;

    /// Значение вне диапазона прижимается к границе
    pub fn new(digits: u8) -> Self {
        Self(digits.clamp(Self::MIN, Self::MAX))
    }

    pub fn digits(&self) -> u8 {
        self.0
    }

    /// Округление половины от нуля (`f64::round`)
    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.0 as i32);
        (value * scale).round() / scale
    }

    pub fn round3(&self, v: [f64; 3]) -> [f64; 3] {
        [self.round(v[0]), self.round(v[1]), self.round(v[2])]
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<u8> for Precision {
    fn from(digits: u8) -> Self {
        Self::new(digits)
    }
}

impl From<Precision> for u8 {
    fn from(p: Precision) -> Self {
        p.0
    }
}

/// Результат выборки: координата или вектор, уже округлённый
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub position: [f64; 3],
    pub precision: Precision,
}

impl Sample {
    /// Создать выборку, округлив сырые значения
    pub fn new(raw: [f64; 3], precision: Precision) -> Self {
        Self {
            position: precision.round3(raw),
            precision,
        }
    }

    /// Текст метки: ровно `precision` знаков на каждую ось
    pub fn label(&self) -> String {
        let p = self.precision.digits() as usize;
        let [x, y, z] = self.position;
        // -0.00 выглядит как ошибка
        let tidy = |v: f64| if v == 0.0 { 0.0 } else { v };
        format!(
            "({:.p$}, {:.p$}, {:.p$})",
            tidy(x),
            tidy(y),
            tidy(z),
            p = p
        )
    }
}

/// Как подписывать элемент
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Округлённая координата
    Coordinates,
    /// Имя компонента, например `cube.vtx[3]`
    ComponentName,
}

/// Охват режима: весь объект или выделенные компоненты
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    WholeObject,
    SingleComponent,
}

/// Режим отображения аннотаций
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    VertexPositions,
    VertexIndices,
    EdgeNormals,
    FaceNormals,
    VertexOnly,
    EdgeOnly,
    FaceOnly,
    VertexFaceNormalOnly,
}

impl DisplayMode {
    /// Все режимы в порядке приоритета обработки
    pub const ALL: [DisplayMode; 8] = [
        DisplayMode::VertexPositions,
        DisplayMode::VertexIndices,
        DisplayMode::EdgeNormals,
        DisplayMode::FaceNormals,
        DisplayMode::VertexOnly,
        DisplayMode::EdgeOnly,
        DisplayMode::FaceOnly,
        DisplayMode::VertexFaceNormalOnly,
    ];

    /// Позиция в `ALL`
    pub fn index(&self) -> usize {
        match self {
            DisplayMode::VertexPositions => 0,
            DisplayMode::VertexIndices => 1,
            DisplayMode::EdgeNormals => 2,
            DisplayMode::FaceNormals => 3,
            DisplayMode::VertexOnly => 4,
            DisplayMode::EdgeOnly => 5,
            DisplayMode::FaceOnly => 6,
            DisplayMode::VertexFaceNormalOnly => 7,
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            DisplayMode::VertexPositions
            | DisplayMode::VertexIndices
            | DisplayMode::EdgeNormals
            | DisplayMode::FaceNormals => Granularity::WholeObject,
            _ => Granularity::SingleComponent,
        }
    }

    pub fn sample_kind(&self) -> SampleKind {
        match self {
            DisplayMode::VertexPositions | DisplayMode::VertexIndices | DisplayMode::VertexOnly => {
                SampleKind::RawPosition
            }
            DisplayMode::EdgeNormals | DisplayMode::EdgeOnly => SampleKind::EdgeMidpoint,
            DisplayMode::FaceNormals | DisplayMode::FaceOnly => SampleKind::FaceCentroid,
            DisplayMode::VertexFaceNormalOnly => SampleKind::VertexNormal,
        }
    }

    pub fn label_style(&self) -> LabelStyle {
        match self {
            DisplayMode::VertexIndices => LabelStyle::ComponentName,
            _ => LabelStyle::Coordinates,
        }
    }

    /// Подпись флажка в окне инструмента
    pub fn display_name(&self) -> &'static str {
        match self {
            DisplayMode::VertexPositions => "Vertex Positions",
            DisplayMode::VertexIndices => "Vertex Index",
            DisplayMode::EdgeNormals => "Edge Normals",
            DisplayMode::FaceNormals => "Face Normals",
            DisplayMode::VertexOnly => "Vertex",
            DisplayMode::EdgeOnly => "Edge Normal",
            DisplayMode::FaceOnly => "Face Normal",
            DisplayMode::VertexFaceNormalOnly => "Vertex Face Normal",
        }
    }
}

/// Аннотация, живущая в сцене до следующего прохода
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Имя узла в сцене хоста
    pub name: AnnotationName,
    /// Элемент выделения, породивший метку
    pub owner: ElementRef,
    pub anchor: [f64; 3],
    pub label: String,
}

/// Полигональная сетка для встроенной сцены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: ObjectId,
    pub vertices: Vec<[f64; 3]>,
    /// Грани как замкнутые циклы индексов вершин
    pub faces: Vec<Vec<usize>>,
    /// Явные нормали vertex-face, ключ `"<vertex>:<face>"`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub normals: BTreeMap<String, [f64; 3]>,
}

impl Mesh {
    pub fn new(name: &str, vertices: Vec<[f64; 3]>, faces: Vec<Vec<usize>>) -> Self {
        Self {
            name: name.to_string(),
            vertices,
            faces,
            normals: BTreeMap::new(),
        }
    }

    /// Ключ явной нормали vertex-face
    pub fn normal_key(vertex: usize, face: usize) -> String {
        format!("{vertex}:{face}")
    }

    /// Рёбра: уникальные неориентированные пары в порядке первого появления
    pub fn edges(&self) -> Vec<[usize; 2]> {
        let mut seen: HashSet<[usize; 2]> = HashSet::new();
        let mut edges: Vec<[usize; 2]> = Vec::new();
        for face in &self.faces {
            if face.len() < 2 {
                continue;
            }
            for i in 0..face.len() {
                let a = face[i];
                let b = face[(i + 1) % face.len()];
                if a == b {
                    continue;
                }
                let key = [a.min(b), a.max(b)];
                if seen.insert(key) {
                    edges.push(key);
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_display_names() {
        assert_eq!(ElementRef::object("cube").to_string(), "cube");
        assert_eq!(ElementRef::vertex("cube", 3).to_string(), "cube.vtx[3]");
        assert_eq!(ElementRef::edge("cube", 5).to_string(), "cube.e[5]");
        assert_eq!(ElementRef::face("cube", 1).to_string(), "cube.f[1]");
        assert_eq!(
            ElementRef::vertex_face("cube", 3, 1).to_string(),
            "cube.vtxFace[3][1]"
        );
    }

    #[test]
    fn test_element_serde() {
        let json = r#"{"type": "edge", "object": "plane", "index": 2}"#;
        let e: ElementRef = serde_json::from_str(json).unwrap();
        assert_eq!(e, ElementRef::edge("plane", 2));
        assert_eq!(e.kind(), ElementKind::Edge);
        assert_eq!(e.object_name(), "plane");
    }

    #[test]
    fn test_anchor_vertex() {
        let vf = ElementRef::vertex_face("m", 4, 2);
        assert_eq!(vf.anchor_vertex(), Some(ElementRef::vertex("m", 4)));
        assert_eq!(ElementRef::face("m", 0).anchor_vertex(), None);
    }

    #[test]
    fn test_precision_clamped() {
        assert_eq!(Precision::new(0).digits(), 1);
        assert_eq!(Precision::new(9).digits(), 5);
        assert_eq!(Precision::default().digits(), 2);
        let p: Precision = serde_json::from_str("7").unwrap();
        assert_eq!(p.digits(), 5);
    }

    #[test]
    fn test_rounding_exact_and_idempotent() {
        let values = [0.0, 1.23456789, -7.77777, 12345.678901, 0.125, -0.5, 3.0];
        for digits in Precision::MIN..=Precision::MAX {
            let p = Precision::new(digits);
            let scale = 10f64.powi(digits as i32);
            for &v in &values {
                let r = p.round(v);
                let scaled = r * scale;
                assert!((scaled - scaled.round()).abs() < 1e-6, "{v} @ {digits} -> {r}");
                assert!((r - v).abs() <= 0.5 / scale + 1e-12);
                assert_eq!(p.round(r), r);
            }
        }
    }

    #[test]
    fn test_round_half_away_from_zero() {
        let p = Precision::new(1);
        assert_eq!(p.round(0.25), 0.3);
        assert_eq!(p.round(-0.25), -0.3);
    }

    #[test]
    fn test_sample_label_fixed_digits() {
        let s = Sample::new([1.0, 1.0, 0.0], Precision::new(2));
        assert_eq!(s.label(), "(1.00, 1.00, 0.00)");
        let s = Sample::new([0.5, 0.5, 0.5], Precision::new(3));
        assert_eq!(s.label(), "(0.500, 0.500, 0.500)");
        let s = Sample::new([-0.0001, 2.0, 0.0], Precision::new(2));
        assert_eq!(s.label(), "(0.00, 2.00, 0.00)");
    }

    #[test]
    fn test_modes_priority_order() {
        for (i, mode) in DisplayMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
        }
        assert_eq!(DisplayMode::EdgeNormals.sample_kind(), SampleKind::EdgeMidpoint);
        assert_eq!(DisplayMode::FaceOnly.granularity(), Granularity::SingleComponent);
        assert_eq!(DisplayMode::VertexIndices.label_style(), LabelStyle::ComponentName);
    }

    #[test]
    fn test_mesh_edges_unique() {
        let quad = Mesh::new(
            "q",
            vec![[0.0; 3], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            vec![vec![0, 1, 2], vec![0, 2, 3]],
        );
        let edges = quad.edges();
        assert_eq!(edges.len(), 5);
        assert_eq!(edges[0], [0, 1]);
        assert_eq!(edges[2], [0, 2]);
    }
}
