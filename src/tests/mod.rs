#[cfg(test)]
mod rendering_tests {
    use crate::parser::*;
    use crate::renderer::*;
    use crate::Result;
    use serde_json::{json, Value};

    fn render_json(document: Value) -> Result<String> {
        Ok(crate::render(&CollectionParser.parse_value(&document)?))
    }

    fn request_node(document: Value) -> RequestNode {
        serde_json::from_value(document).expect("valid request node")
    }

    fn heading_lines(output: &str) -> Vec<&str> {
        output.lines().filter(|line| line.starts_with('#')).collect()
    }

    /// Column count of a table row, ignoring `|` escaped by an odd run of backslashes.
    fn column_count(row: &str) -> usize {
        let mut backslashes = 0;
        let mut delimiters = 0;
        for c in row.chars() {
            match c {
                '\\' => backslashes += 1,
                '|' if backslashes % 2 == 0 => {
                    delimiters += 1;
                    backslashes = 0;
                }
                _ => backslashes = 0,
            }
        }
        delimiters - 1
    }

    #[test]
    fn test_minimal_collection() -> Result<()> {
        let output = render_json(json!({
            "info": { "name": "API" },
            "item": [{
                "name": "Get",
                "request": { "method": "GET", "url": { "raw": "http://x" } },
                "header": [],
                "response": []
            }]
        }))?;

        let expected = format!(
            "# API\n\n## `GET` Get\n>```\n>http://x\n>```\n\n{}\n",
            separator()
        );
        assert_eq!(output, expected);
        Ok(())
    }

    #[test]
    fn test_folder_renders_children_in_order_one_level_deeper() -> Result<()> {
        let output = render_json(json!({
            "info": { "name": "API" },
            "item": [{
                "name": "Users",
                "item": [
                    { "name": "A", "request": { "method": "GET", "url": "http://x/a" } },
                    { "name": "B", "request": { "method": "POST", "url": "http://x/b" } }
                ]
            }]
        }))?;

        assert_eq!(
            heading_lines(&output),
            vec!["# API", "## 📁 Users", "#### `GET` A", "#### `POST` B"]
        );
        assert_eq!(output.matches("📁").count(), 1);
        assert!(output.find("`GET` A").unwrap() < output.find("`POST` B").unwrap());
        Ok(())
    }

    #[test]
    fn test_depth_follows_folder_nesting_and_caps() -> Result<()> {
        fn nest(levels: usize) -> Value {
            if levels == 0 {
                return json!({ "name": "Leaf", "request": { "method": "GET", "url": "http://x" } });
            }
            json!({ "name": format!("F{}", levels), "item": [nest(levels - 1)] })
        }

        let output = render_json(json!({ "info": { "name": "Deep" }, "item": [nest(6)] }))?;

        assert_eq!(
            heading_lines(&output),
            vec![
                "# Deep",
                "## 📁 F6",
                "### 📁 F5",
                "#### 📁 F4",
                "##### 📁 F3",
                "##### 📁 F2",
                "##### 📁 F1",
                "###### `GET` Leaf",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_sections_follow_request_depth() {
        let request = request_node(json!({
            "name": "Create",
            "request": {
                "method": "POST",
                "url": "http://x",
                "header": [{ "key": "Accept", "value": "*/*" }]
            },
            "response": [{ "code": 201, "body": "{}" }]
        }));

        for (depth, request_heading, section_heading) in [
            (1, "## `POST` Create", "### Headers"),
            (3, "#### `POST` Create", "##### Headers"),
            (4, "##### `POST` Create", "###### Headers"),
            (7, "###### `POST` Create", "###### Headers"),
        ] {
            let output = request.render(&RenderContext::new().with_depth(depth));
            assert!(output.contains(&format!("\n{}\n", request_heading)), "depth {}", depth);
            assert!(output.contains(&format!("\n{}\n", section_heading)), "depth {}", depth);
        }
    }

    #[test]
    fn test_lone_request_uses_default_depth() {
        let request = request_node(json!({
            "name": "Ping",
            "request": { "method": "GET", "url": { "raw": "http://x/ping" } }
        }));

        let output = request.render(&RenderContext::default());
        assert!(output.starts_with("\n## `GET` Ping\n"));
    }

    #[test]
    fn test_lone_node_renders_without_walker_depth() {
        let node = Node::Request(request_node(json!({
            "name": "Ping",
            "request": { "method": "HEAD", "url": "http://x/ping" }
        })));

        let output = node.render(&RenderContext::default());
        assert!(output.starts_with("\n## `HEAD` Ping\n>```\n>http://x/ping\n>```\n"));
    }

    #[test]
    fn test_request_sections_in_order() {
        let request = request_node(json!({
            "name": "Update",
            "request": {
                "method": "PUT",
                "description": "Updates a user",
                "url": {
                    "raw": "http://x/users/:id?notify=true",
                    "query": [{ "key": "notify", "value": "true", "description": "Send mail" }],
                    "variable": [{ "key": "id", "value": "7" }]
                },
                "header": [{ "key": "Content-Type", "value": "application/json" }],
                "body": { "mode": "raw", "raw": "{}", "options": { "raw": { "language": "json" } } },
                "auth": { "type": "bearer", "bearer": { "token": "abc" } }
            },
            "response": [{ "code": 200, "body": "{\"ok\":true}" }]
        }));

        let output = request.render(&RenderContext::new().with_depth(2));
        let separator = separator();
        let order: [&str; 10] = [
            "### `PUT` Update",
            "Updates a user",
            ">http://x/users/:id?notify=true",
            "#### Headers",
            "#### Body (**json**)",
            "#### Query Params",
            "#### Path Params",
            "#### 🔑 Authorization (bearer)",
            "#### Example Response (HTTP 200)",
            separator.as_str(),
        ];

        let positions: Vec<usize> = order
            .iter()
            .map(|needle| output.find(needle).unwrap_or_else(|| panic!("missing {}", needle)))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{}", output);
        assert!(output.ends_with(&format!("\n{}\n", separator)));
    }

    #[test]
    fn test_absent_fields_remove_exactly_their_section() {
        let full = json!({
            "name": "Update",
            "request": {
                "method": "PUT",
                "url": {
                    "raw": "http://x/:id",
                    "query": [{ "key": "q", "value": "1" }],
                    "variable": [{ "key": "id", "value": "7" }]
                },
                "header": [{ "key": "Accept", "value": "*/*" }],
                "body": { "mode": "raw", "raw": "{}" },
                "auth": { "type": "apikey", "apikey": [{ "key": "key", "value": "k", "type": "string" }] }
            },
            "response": [{ "code": 200, "body": "{}" }]
        });
        let context = RenderContext::new().with_depth(2);
        let full_request = request_node(full.clone());
        let full_output = full_request.render(&context);
        let spec = full_request.request.as_ref().unwrap();
        let url = spec.url.as_ref().unwrap();

        let cases: Vec<(&str, String)> = vec![
            ("/request/header", Headers(&spec.header).render(&context)),
            ("/request/body", spec.body.render(&context)),
            ("/request/url/query", QueryParams(url.query.as_deref().unwrap()).render(&context)),
            ("/request/url/variable", PathVariables(url.variable.as_deref().unwrap()).render(&context)),
            ("/request/auth", spec.auth.render(&context)),
            ("/response", Responses(&full_request.response).render(&context)),
        ];

        for (pointer, section) in cases {
            assert!(!section.is_empty(), "{} rendered nothing", pointer);

            let mut reduced = full.clone();
            let (parent, field) = pointer.rsplit_once('/').unwrap();
            let target = if parent.is_empty() {
                &mut reduced
            } else {
                reduced.pointer_mut(parent).unwrap()
            };
            target.as_object_mut().unwrap().remove(field);

            let reduced_output = request_node(reduced).render(&context);
            assert_eq!(full_output.replacen(&section, "", 1), reduced_output, "{}", pointer);
        }
    }

    #[test]
    fn test_missing_values_render_placeholder() {
        let request = request_node(json!({ "name": "Bare" }));
        let output = request.render(&RenderContext::new().with_depth(2));
        assert!(output.starts_with("\n### `undefined` Bare\n>```\n>undefined\n>```\n"));

        let output = crate::render(&Collection {
            info: Info::default(),
            auth: None,
            item: vec![],
        });
        assert_eq!(output, "# undefined\n");
    }

    #[test]
    fn test_description_presence_not_truthiness() -> Result<()> {
        let with_empty = render_json(json!({
            "info": { "name": "API", "description": "" },
            "item": []
        }))?;
        assert_eq!(with_empty, "# API\n\n");

        let with_null = render_json(json!({
            "info": { "name": "API", "description": null },
            "item": []
        }))?;
        assert_eq!(with_null, "# API\n");

        let rich = render_json(json!({
            "info": { "name": "API", "description": { "content": "Docs", "type": "text/markdown" } },
            "item": []
        }))?;
        assert_eq!(rich, "# API\nDocs\n");
        Ok(())
    }

    #[test]
    fn test_folder_without_description_has_no_placeholder() -> Result<()> {
        let output = render_json(json!({
            "info": { "name": "API" },
            "item": [{ "name": "Empty", "item": [] }]
        }))?;
        assert_eq!(output, "# API\n## 📁 Empty\n\n");
        assert!(!output.contains("undefined"));

        let output = render_json(json!({
            "info": { "name": "API" },
            "item": [{ "name": "Docs", "description": "All docs", "item": [] }]
        }))?;
        assert_eq!(output, "# API\n## 📁 Docs\nAll docs\n\n");
        Ok(())
    }

    #[test]
    fn test_root_and_folder_auth() -> Result<()> {
        let output = render_json(json!({
            "info": { "name": "API" },
            "auth": { "type": "bearer", "bearer": [{ "key": "token", "value": "root", "type": "string" }] },
            "item": [{
                "name": "Admin",
                "auth": { "type": "noauth" },
                "item": [{
                    "name": "Stats",
                    "auth": { "type": "basic", "basic": { "username": "ada" } },
                    "item": []
                }]
            }]
        }))?;

        assert!(output.starts_with(
            "# API\n## 🔑 Authorization (bearer)\n\n|Key|Value|Type|\n|---|---|---|\n|token|root|string|\n\n\n"
        ));
        assert_eq!(output.matches("Authorization").count(), 2);
        assert!(output.contains("### 📁 Stats\n##### 🔑 Authorization (basic)\n"));
        assert!(output.contains("|username|ada|string|\n"));
        Ok(())
    }

    #[test]
    fn test_pre_order_traversal() -> Result<()> {
        let output = render_json(json!({
            "info": { "name": "API" },
            "item": [
                { "name": "r1", "request": { "method": "GET", "url": "u" } },
                { "name": "F", "item": [
                    { "name": "r2", "request": { "method": "GET", "url": "u" } },
                    { "name": "G", "item": [
                        { "name": "r3", "request": { "method": "GET", "url": "u" } }
                    ]},
                    { "name": "r4", "request": { "method": "GET", "url": "u" } }
                ]},
                { "name": "r5", "request": { "method": "GET", "url": "u" } }
            ]
        }))?;

        let names: Vec<&str> = heading_lines(&output)
            .into_iter()
            .skip(1)
            .map(|line| line.rsplit(' ').next().unwrap())
            .collect();
        assert_eq!(names, vec!["r1", "F", "r2", "G", "r3", "r4", "r5"]);
        assert_eq!(
            heading_lines(&output),
            vec![
                "# API",
                "## `GET` r1",
                "## 📁 F",
                "#### `GET` r2",
                "### 📁 G",
                "##### `GET` r3",
                "#### `GET` r4",
                "## `GET` r5",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_root_request_matches_root_folder_level() -> Result<()> {
        let output = render_json(json!({
            "info": { "name": "API" },
            "item": [
                { "name": "r", "request": {
                    "method": "GET",
                    "url": "u",
                    "header": [{ "key": "Accept", "value": "*/*" }]
                }},
                { "name": "F", "item": [
                    { "name": "s", "request": { "method": "GET", "url": "u" } }
                ]}
            ]
        }))?;

        assert_eq!(
            heading_lines(&output),
            vec!["# API", "## `GET` r", "### Headers", "## 📁 F", "#### `GET` s"]
        );
        Ok(())
    }

    #[test]
    fn test_every_table_row_has_header_width() -> Result<()> {
        let output = render_json(json!({
            "info": { "name": "API" },
            "auth": { "type": "bearer", "bearer": { "token": "abc" } },
            "item": [{
                "name": "Upload",
                "request": {
                    "method": "POST",
                    "url": {
                        "raw": "http://x/:id",
                        "query": [{ "key": "a|b", "value": "1" }],
                        "variable": [{ "key": "id" }, { "value": "orphan" }]
                    },
                    "header": [
                        { "key": "X", "value": "multi\nline" },
                        { "key": "Path", "value": "C:\\dir\\" }
                    ],
                    "body": { "mode": "formdata", "formdata": [
                        { "key": "f", "type": "file", "src": "a.png" },
                        { "key": "t", "type": "text", "value": "v" }
                    ]}
                }
            }]
        }))?;

        let mut width = None;
        for line in output.lines() {
            if !line.starts_with('|') {
                width = None;
                continue;
            }
            let columns = column_count(line);
            match width {
                None => width = Some(columns),
                Some(expected) => assert_eq!(columns, expected, "row {}", line),
            }
        }
        assert!(output.contains("|f|a.png|file|\n"));
        assert!(output.contains("|Path|C:\\\\dir\\\\|\n"));
        assert_eq!(column_count("|a\\|b|"), 1);
        assert_eq!(column_count("|a\\\\|b|"), 2);
        Ok(())
    }
}
