use std::sync::atomic::{AtomicU8, Ordering};

use shared::DisplayMode;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Ru,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::Ru,
        _ => Lang::En,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::En => 0,
            Lang::Ru => 1,
        },
        Ordering::Relaxed,
    );
}

/// Checkbox label of a display mode
pub fn mode_label(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::VertexPositions => t("mode.vertex_positions"),
        DisplayMode::VertexIndices => t("mode.vertex_indices"),
        DisplayMode::EdgeNormals => t("mode.edge_normals"),
        DisplayMode::FaceNormals => t("mode.face_normals"),
        DisplayMode::VertexOnly => t("mode.vertex_only"),
        DisplayMode::EdgeOnly => t("mode.edge_only"),
        DisplayMode::FaceOnly => t("mode.face_only"),
        DisplayMode::VertexFaceNormalOnly => t("mode.vertex_face_normal_only"),
    }
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.edit" => if ru { "Правка" } else { "Edit" },
        "menu.undo" => if ru { "Отменить  Ctrl+Z" } else { "Undo  Ctrl+Z" },
        "menu.deselect_all" => if ru { "Снять выделение  Esc" } else { "Deselect all  Esc" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.scene_tree" => if ru { "Дерево сцены" } else { "Scene tree" },
        "menu.tool_window" => if ru { "Окно PPC" } else { "PPC window" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "menu.create" => if ru { "Создать" } else { "Create" },

        // ── Meshes ──────────────────────────────────────────
        "prim.cube" => if ru { "Куб" } else { "Cube" },
        "prim.plane" => if ru { "Плоскость" } else { "Plane" },
        "prim.triangle" => if ru { "Треугольник" } else { "Triangle" },
        "prim.hexagon" => if ru { "Шестиугольник" } else { "Hexagon" },
        "prim.grid" => if ru { "Сетка 10x10" } else { "Grid 10x10" },

        // ── Tool window ─────────────────────────────────────
        "tool.precision" => if ru { "Точность" } else { "Precision" },
        "tool.rename" => if ru { "Имя" } else { "Name" },
        "tool.rename_hint" => if ru { "Enter: переименовать" } else { "Enter to rename" },
        "tool.reload" => if ru { "Обновить" } else { "Reload" },
        "tool.delete" => if ru { "Удалить" } else { "Delete" },
        "tool.undo" => if ru { "Отменить" } else { "Undo" },

        // ── Display modes ───────────────────────────────────
        "mode.vertex_positions" => if ru { "Позиции вершин" } else { "Vertex Positions" },
        "mode.vertex_indices" => if ru { "Индексы вершин" } else { "Vertex Index" },
        "mode.edge_normals" => if ru { "Нормали рёбер" } else { "Edge Normals" },
        "mode.face_normals" => if ru { "Нормали граней" } else { "Face Normals" },
        "mode.vertex_only" => if ru { "Вершина" } else { "Vertex" },
        "mode.edge_only" => if ru { "Нормаль ребра" } else { "Edge Normal" },
        "mode.face_only" => if ru { "Нормаль грани" } else { "Face Normal" },
        "mode.vertex_face_normal_only" => if ru { "Нормаль вершины" } else { "Vertex Face Normal" },

        // ── Scene tree ──────────────────────────────────────
        "tree.title" => if ru { "Сцена" } else { "Scene" },
        "tree.empty" => if ru { "Нет объектов" } else { "No meshes" },
        "tree.vertices" => if ru { "Вершины" } else { "Vertices" },
        "tree.edges" => if ru { "Рёбра" } else { "Edges" },
        "tree.faces" => if ru { "Грани" } else { "Faces" },
        "tree.vertex_faces" => if ru { "Вершины граней" } else { "Vertex faces" },
        "tree.remove" => if ru { "Удалить объект" } else { "Remove mesh" },

        // ── Viewport ────────────────────────────────────────
        "view.components" => if ru { "Компоненты" } else { "Components" },
        "view.objects" => if ru { "Объекты" } else { "Objects" },

        // ── Status bar ──────────────────────────────────────
        "status.idle" => if ru { "Ожидание" } else { "Idle" },
        "status.active" => if ru { "Активно" } else { "Active" },
        "status.closed" => if ru { "Закрыто" } else { "Closed" },
        "status.annotations" => if ru { "Аннотации" } else { "Annotations" },
        "status.selection" => if ru { "Выделено" } else { "Selected" },
        "status.nothing" => if ru { "Ничего не выделено" } else { "Nothing selected" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_labels_match_mode_names() {
        // Default language carries the host-facing names
        if lang() == Lang::En {
            for mode in DisplayMode::ALL {
                assert_eq!(mode_label(mode), mode.display_name());
            }
        }
    }

    #[test]
    fn test_unknown_key_fallback() {
        assert_eq!(t("no.such.key"), "???");
    }
}
